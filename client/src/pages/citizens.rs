//! Citizen list (paged, searchable) and citizen detail pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::{A, Redirect};
use leptos_router::hooks::use_params_map;

use crate::components::pagination::Pagination;
use crate::components::status_badge::StatusBadge;
use crate::net::types::{Citizen, License, LicenseApplication, Role};
use crate::net::{applications, citizens};
use crate::pages::{spawn_task, use_auth};
use crate::state::wizard::search_query;
use crate::util::format::{PAGE_SIZE, total_pages};
use crate::util::latest::LatestRequest;

#[component]
pub fn CitizensPage() -> impl IntoView {
    let (service, _) = use_auth();

    let rows = RwSignal::new(Vec::<Citizen>::new());
    let total = RwSignal::new(0_u64);
    let page = RwSignal::new(1_u32);
    let search = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    // Short queries fall back to the paged list.
    let query = Memo::new(move |_| search_query(&search.get()).map(str::to_owned));
    let latest = LatestRequest::default();

    Effect::new(move || {
        let current_page = page.get();
        let current_query = query.get();
        loading.set(true);
        let ticket = latest.begin();
        let latest = latest.clone();
        let service = Arc::clone(&service);
        spawn_task(async move {
            let result = match current_query {
                Some(q) => citizens::search(service.api(), &q).await.map(|found| {
                    let count = found.len() as u64;
                    (found, count)
                }),
                None => citizens::list(service.api(), current_page, PAGE_SIZE)
                    .await
                    .map(|paged| (paged.data, paged.total)),
            };
            if !latest.is_current(ticket) {
                return;
            }
            match result {
                Ok((data, count)) => {
                    rows.set(data);
                    total.set(count);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    });

    let pages = Signal::derive(move || if query.get().is_some() { 1 } else { total_pages(total.get(), PAGE_SIZE) });

    view! {
        <section class="records">
            <header class="records__header">
                <h1>"Citizens"</h1>
                <A href="/citizens/new" attr:class="btn btn--primary">"New citizen"</A>
                <input
                    class="records__search"
                    type="search"
                    placeholder="Search by name or ID number"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
            </header>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="records__loading">"Loading..."</p> }>
                <table class="records__table">
                    <thead>
                        <tr>
                            <th>"ID number"</th>
                            <th>"Name"</th>
                            <th>"Date of birth"</th>
                            <th>"Phone"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|citizen| {
                                    let href = format!("/citizens/{}", citizen.id);
                                    let name = citizen.full_name();
                                    view! {
                                        <tr>
                                            <td>{citizen.id_number.clone()}</td>
                                            <td>
                                                <A href=href>{name}</A>
                                            </td>
                                            <td>{citizen.date_of_birth.clone()}</td>
                                            <td>{citizen.phone_number.clone()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class="records__empty">"No citizens found."</p>
                </Show>
            </Show>
            <Pagination page=page total_pages=pages/>
        </section>
    }
}

#[component]
pub fn CitizenDetailPage() -> impl IntoView {
    let (service, auth) = use_auth();
    let params = use_params_map();
    let citizen_id = move || params.read().get("id").unwrap_or_default();

    let citizen = RwSignal::new(None::<Citizen>);
    let licenses = RwSignal::new(Vec::<License>::new());
    let history = RwSignal::new(Vec::<LicenseApplication>::new());
    let register = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let deleted = RwSignal::new(false);

    let load_service = Arc::clone(&service);
    Effect::new(move || {
        let id = citizen_id();
        if id.is_empty() {
            return;
        }
        let service = Arc::clone(&load_service);
        spawn_task(async move {
            let api = service.api();
            match citizens::get(api, &id).await {
                Ok(found) => citizen.set(Some(found)),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    return;
                }
            }
            match citizens::licenses(api, &id).await {
                Ok(found) => licenses.set(found),
                Err(e) => leptos::logging::warn!("citizen licenses failed: {e}"),
            }
            match applications::for_citizen(api, &id).await {
                Ok(found) => history.set(found),
                Err(e) => leptos::logging::warn!("citizen applications failed: {e}"),
            }
        });
    });

    let lookup_service = Arc::clone(&service);
    let on_register_lookup = move |_| {
        let Some(id_number) = citizen.get().map(|c| c.id_number) else {
            return;
        };
        let service = Arc::clone(&lookup_service);
        spawn_task(async move {
            let text = match citizens::external_record(service.api(), &id_number).await {
                Ok(record) => serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string()),
                Err(e) => e.user_message(),
            };
            register.set(Some(text));
        });
    };

    let on_delete = move |_| {
        let id = citizen_id();
        let service = Arc::clone(&service);
        spawn_task(async move {
            match citizens::delete(service.api(), &id).await {
                Ok(()) => deleted.set(true),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <section class="record-detail">
            <Show when=move || deleted.get()>
                <Redirect path="/citizens"/>
            </Show>
            <A href="/citizens" attr:class="record-detail__back">"Back to citizens"</A>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || match citizen.get() {
                None => view! { <p class="records__loading">"Loading..."</p> }.into_any(),
                Some(c) => {
                    view! {
                        <h1>{c.full_name()}</h1>
                        <dl class="record-detail__fields">
                            <dt>"ID number"</dt>
                            <dd>{c.id_number.clone()}</dd>
                            <dt>"Date of birth"</dt>
                            <dd>{c.date_of_birth.clone()}</dd>
                            <dt>"Gender"</dt>
                            <dd>{c.gender.clone()}</dd>
                            <dt>"Nationality"</dt>
                            <dd>{c.nationality.clone()}</dd>
                            <dt>"Address"</dt>
                            <dd>{c.address.clone()}</dd>
                            <dt>"Phone"</dt>
                            <dd>{c.phone_number.clone()}</dd>
                            <dt>"Email"</dt>
                            <dd>{c.email.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                        </dl>
                    }
                        .into_any()
                }
            }}
            <h2>"Licenses"</h2>
            <ul class="record-detail__list">
                {move || {
                    licenses
                        .get()
                        .into_iter()
                        .map(|license| {
                            let href = format!("/licenses/{}", license.id);
                            view! {
                                <li>
                                    <A href=href>{license.license_number.clone()}</A>
                                    " "
                                    <span>{format!("Code {}", license.category)}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <h2>"Applications"</h2>
            <ul class="record-detail__list">
                {move || {
                    history
                        .get()
                        .into_iter()
                        .map(|application| {
                            let href = format!("/applications/{}", application.id);
                            view! {
                                <li>
                                    <A href=href>{application.application_type.label()}</A>
                                    " "
                                    <StatusBadge status=application.status/>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <div class="record-detail__actions">
                <A href=move || format!("/citizens/{}/edit", citizen_id()) attr:class="btn">"Edit"</A>
                <button class="btn" on:click=on_register_lookup>
                    "Check population register"
                </button>
                <Show when=move || auth.get().has_permission(Role::Manager)>
                    <button class="btn btn--danger" on:click=on_delete.clone()>
                        "Delete citizen"
                    </button>
                </Show>
            </div>
            <Show when=move || register.get().is_some()>
                <pre class="record-detail__register">{move || register.get().unwrap_or_default()}</pre>
            </Show>
        </section>
    }
}
