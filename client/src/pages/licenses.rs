//! Issued-license list and detail pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::pagination::Pagination;
use crate::net::licenses;
use crate::net::types::{License, LicenseCategory};
use crate::pages::{spawn_task, use_auth};
use crate::util::format::{PAGE_SIZE, total_pages};

/// Category code with its description when the code is known.
fn category_text(code: &str) -> String {
    match LicenseCategory::from_code(code) {
        Some(category) => format!("{} ({})", category.code(), category.label()),
        None => code.to_owned(),
    }
}

#[component]
pub fn LicensesPage() -> impl IntoView {
    let (service, _) = use_auth();

    let rows = RwSignal::new(Vec::<License>::new());
    let total = RwSignal::new(0_u64);
    let page = RwSignal::new(1_u32);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let current_page = page.get();
        loading.set(true);
        let service = Arc::clone(&service);
        spawn_task(async move {
            match licenses::list(service.api(), current_page, PAGE_SIZE).await {
                Ok(paged) => {
                    rows.set(paged.data);
                    total.set(paged.total);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    });

    view! {
        <section class="records">
            <header class="records__header">
                <h1>"Licenses"</h1>
            </header>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="records__loading">"Loading..."</p> }>
                <table class="records__table">
                    <thead>
                        <tr>
                            <th>"License number"</th>
                            <th>"Category"</th>
                            <th>"Status"</th>
                            <th>"Expires"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|license| {
                                    let href = format!("/licenses/{}", license.id);
                                    view! {
                                        <tr>
                                            <td>
                                                <A href=href>{license.license_number.clone()}</A>
                                            </td>
                                            <td>{category_text(&license.category)}</td>
                                            <td>{license.status.clone().unwrap_or_default()}</td>
                                            <td>{license.expiry_date.clone().unwrap_or_default()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class="records__empty">"No licenses found."</p>
                </Show>
            </Show>
            <Pagination page=page total_pages=Signal::derive(move || total_pages(total.get(), PAGE_SIZE))/>
        </section>
    }
}

#[component]
pub fn LicenseDetailPage() -> impl IntoView {
    let (service, _) = use_auth();
    let params = use_params_map();

    let license = RwSignal::new(None::<License>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(id) = params.read().get("id") else {
            return;
        };
        let service = Arc::clone(&service);
        spawn_task(async move {
            match licenses::get(service.api(), &id).await {
                Ok(found) => license.set(Some(found)),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        <section class="record-detail">
            <A href="/licenses" attr:class="record-detail__back">"Back to licenses"</A>
            {move || match (license.get(), error.get()) {
                (_, Some(message)) => view! { <p class="records__error">{message}</p> }.into_any(),
                (None, None) => view! { <p class="records__loading">"Loading..."</p> }.into_any(),
                (Some(l), None) => {
                    let holder = format!("/citizens/{}", l.citizen_id);
                    view! {
                        <h1>{format!("License {}", l.license_number)}</h1>
                        <dl class="record-detail__fields">
                            <dt>"Category"</dt>
                            <dd>{category_text(&l.category)}</dd>
                            <dt>"Status"</dt>
                            <dd>{l.status.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                            <dt>"Issued"</dt>
                            <dd>{l.issue_date.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                            <dt>"Expires"</dt>
                            <dd>{l.expiry_date.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                            <dt>"Holder"</dt>
                            <dd>
                                <A href=holder>"View citizen"</A>
                            </dd>
                        </dl>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
