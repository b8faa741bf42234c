//! Citizen create and edit pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::{A, Redirect};
use leptos_router::hooks::use_params_map;

use crate::components::citizen_editor::{CitizenDraft, CitizenEditor};
use crate::net::citizens;
use crate::net::types::{Citizen, CitizenForm};
use crate::pages::{spawn_task, use_auth};

#[component]
pub fn NewCitizenPage() -> impl IntoView {
    let (service, _) = use_auth();

    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(None::<String>);

    let on_submit = Callback::new(move |form: CitizenForm| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        let service = Arc::clone(&service);
        spawn_task(async move {
            match citizens::create(service.api(), &form).await {
                Ok(citizen) => saved.set(Some(citizen.id)),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    });

    view! {
        <section class="record-detail">
            {move || saved.get().map(|id| view! { <Redirect path=format!("/citizens/{id}")/> })}
            <A href="/citizens" attr:class="record-detail__back">"Back to citizens"</A>
            <h1>"New citizen"</h1>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <CitizenEditor initial=CitizenDraft::default() submit_label="Create citizen" busy=busy on_submit=on_submit/>
        </section>
    }
}

#[component]
pub fn EditCitizenPage() -> impl IntoView {
    let (service, _) = use_auth();
    let params = use_params_map();
    let citizen_id = move || params.read().get("id").unwrap_or_default();

    let citizen = RwSignal::new(None::<Citizen>);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);

    let load_service = Arc::clone(&service);
    Effect::new(move || {
        let id = citizen_id();
        if id.is_empty() {
            return;
        }
        let service = Arc::clone(&load_service);
        spawn_task(async move {
            match citizens::get(service.api(), &id).await {
                Ok(found) => citizen.set(Some(found)),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    let on_submit = Callback::new(move |form: CitizenForm| {
        if busy.get_untracked() {
            return;
        }
        let id = citizen_id();
        busy.set(true);
        error.set(None);
        let service = Arc::clone(&service);
        spawn_task(async move {
            match citizens::update(service.api(), &id, &form).await {
                Ok(_) => saved.set(true),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    });

    let back = move || format!("/citizens/{}", citizen_id());

    view! {
        <section class="record-detail">
            <Show when=move || saved.get()>
                <Redirect path=back()/>
            </Show>
            <A href=back attr:class="record-detail__back">"Back to citizen"</A>
            <h1>"Edit citizen"</h1>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                citizen
                    .get()
                    .map(|found| {
                        view! {
                            <CitizenEditor
                                initial=CitizenDraft::from(&found)
                                submit_label="Save changes"
                                busy=busy
                                on_submit=on_submit
                            />
                        }
                    })
            }}
        </section>
    }
}
