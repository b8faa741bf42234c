//! New-application wizard page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three steps over one `ApplicationWizard` signal: pick the citizen, choose
//! category and type, attach documents. Step gating and the final form live
//! in `state::wizard`; this page only renders and fetches. A successful
//! submit redirects to the new application's detail page.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::Redirect;

use crate::net::types::{ApplicationType, Citizen, LicenseCategory};
use crate::net::{applications, citizens};
use crate::pages::{spawn_task, use_auth};
use crate::state::wizard::{ApplicationWizard, MIN_SEARCH_LEN, WizardStep, search_query};
use crate::util::latest::LatestRequest;

#[component]
pub fn NewApplicationPage() -> impl IntoView {
    let (service, _) = use_auth();

    let wizard = RwSignal::new(ApplicationWizard::default());
    let search = RwSignal::new(String::new());
    let matches = RwSignal::new(Vec::<Citizen>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let created = RwSignal::new(None::<String>);

    let search_service = Arc::clone(&service);
    let latest = LatestRequest::default();
    Effect::new(move || {
        let raw = search.get();
        let ticket = latest.begin();
        let Some(query) = search_query(&raw).map(str::to_owned) else {
            matches.set(Vec::new());
            return;
        };
        let latest = latest.clone();
        let service = Arc::clone(&search_service);
        spawn_task(async move {
            let result = citizens::search(service.api(), &query).await;
            if !latest.is_current(ticket) {
                return;
            }
            match result {
                Ok(found) => matches.set(found),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    let step = move || wizard.with(|w| w.step);
    let can_advance = move || wizard.with(ApplicationWizard::can_advance);

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(files) = input.files() else {
                return;
            };
            spawn_task(async move {
                let attachments = crate::pages::read_attachments(files).await;
                wizard.update(|w| w.add_documents(attachments));
                input.set_value("");
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_submit = move |_| {
        if busy.get() {
            return;
        }
        let Some(form) = wizard.with(ApplicationWizard::submission) else {
            error.set(Some("Choose a citizen and a license category first.".to_owned()));
            return;
        };
        busy.set(true);
        error.set(None);
        let service = Arc::clone(&service);
        spawn_task(async move {
            match applications::create(service.api(), &form).await {
                Ok(application) => created.set(Some(application.id)),
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    };

    let citizen_step = move || {
        view! {
            {move || match wizard.with(|w| w.citizen.clone()) {
                Some(citizen) => {
                    view! {
                        <div class="wizard__selected">
                            <strong>{citizen.full_name()}</strong>
                            <span>{citizen.id_number.clone()}</span>
                            <button class="btn btn--ghost" on:click=move |_| wizard.update(ApplicationWizard::clear_citizen)>
                                "Change"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <input
                            class="records__search"
                            type="search"
                            placeholder=format!("Name or ID number ({MIN_SEARCH_LEN}+ characters)")
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                        />
                        <ul class="wizard__matches">
                            {move || {
                                matches
                                    .get()
                                    .into_iter()
                                    .map(|citizen| {
                                        let label = format!("{} ({})", citizen.full_name(), citizen.id_number);
                                        view! {
                                            <li>
                                                <button
                                                    class="btn btn--ghost"
                                                    on:click=move |_| {
                                                        let chosen = citizen.clone();
                                                        wizard.update(|w| w.select_citizen(chosen));
                                                    }
                                                >
                                                    {label}
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    }
                        .into_any()
                }
            }}
        }
    };

    let details_step = move || {
        view! {
            <label class="field">
                <span class="field__label">"License category"</span>
                <select
                    prop:value=move || wizard.with(|w| w.category.map(LicenseCategory::code).unwrap_or_default())
                    on:change=move |ev| {
                        let category = LicenseCategory::from_code(&event_target_value(&ev));
                        wizard.update(|w| w.category = category);
                    }
                >
                    <option value="">"Select a category"</option>
                    {LicenseCategory::ALL
                        .into_iter()
                        .map(|c| view! { <option value=c.code()>{format!("{} - {}", c.code(), c.label())}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Application type"</span>
                <select
                    prop:value=move || wizard.with(|w| w.application_type.code())
                    on:change=move |ev| {
                        if let Some(kind) = ApplicationType::from_code(&event_target_value(&ev)) {
                            wizard.update(|w| w.application_type = kind);
                        }
                    }
                >
                    {ApplicationType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.code()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Notes"</span>
                <textarea
                    prop:value=move || wizard.with(|w| w.notes.clone())
                    on:input=move |ev| {
                        let notes = event_target_value(&ev);
                        wizard.update(|w| w.notes = notes);
                    }
                ></textarea>
            </label>
        }
    };

    let documents_step = move || {
        view! {
            <input class="wizard__files" type="file" multiple=true on:change=on_files/>
            <ul class="wizard__documents">
                {move || {
                    wizard
                        .with(|w| w.documents.iter().map(|d| d.file_name.clone()).collect::<Vec<_>>())
                        .into_iter()
                        .enumerate()
                        .map(|(index, name)| {
                            view! {
                                <li>
                                    <span>{name}</span>
                                    <button class="btn btn--ghost" on:click=move |_| wizard.update(|w| w.remove_document(index))>
                                        "Remove"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        }
    };

    view! {
        <section class="wizard">
            {move || created.get().map(|id| view! { <Redirect path=format!("/applications/{id}")/> })}
            <h1>"New application"</h1>
            <ol class="wizard__steps">
                {WizardStep::ALL
                    .into_iter()
                    .map(|s| {
                        view! {
                            <li class:wizard__step--active=move || step() == s>
                                {format!("{}. {}", s.number(), s.title())}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
            <div class="wizard__body">
                {move || match step() {
                    WizardStep::Citizen => citizen_step().into_any(),
                    WizardStep::Details => details_step().into_any(),
                    WizardStep::Documents => documents_step().into_any(),
                }}
            </div>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="wizard__nav">
                <button
                    class="btn btn--ghost"
                    disabled=move || step() == WizardStep::Citizen
                    on:click=move |_| wizard.update(ApplicationWizard::back)
                >
                    "Back"
                </button>
                {move || {
                    if step() == WizardStep::Documents {
                        view! {
                            <button class="btn btn--primary" disabled=move || busy.get() on:click=on_submit.clone()>
                                "Submit application"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button
                                class="btn btn--primary"
                                disabled=move || !can_advance()
                                on:click=move |_| {
                                    wizard.update(|w| {
                                        w.next();
                                    });
                                }
                            >
                                "Next"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}
