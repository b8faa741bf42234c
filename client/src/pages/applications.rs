//! Application list (all or pending) and application detail with review
//! actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The review actions (approve, reject, request documents) appear only for
//! officers and above and only while the application is still open. The
//! gateway enforces the same rule; hiding the controls just keeps clerks
//! from hitting a 403.

#[cfg(test)]
#[path = "applications_test.rs"]
mod applications_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::{A, Redirect};
use leptos_router::hooks::use_params_map;

use crate::components::pagination::Pagination;
use crate::components::status_badge::StatusBadge;
use crate::net::applications;
use crate::net::error::ApiError;
use crate::net::types::{ApplicationForm, ApplicationStatus, Attachment, LicenseApplication, LicenseCategory, Role};
use crate::pages::{spawn_task, use_auth};
use crate::state::auth::AuthState;
use crate::util::format::{PAGE_SIZE, parse_document_list, total_pages};
use crate::util::latest::LatestRequest;

/// Which list the applications page shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ListFilter {
    #[default]
    All,
    Pending,
}

/// Whether `state` may act on an application in `status`.
fn can_review(state: &AuthState, status: ApplicationStatus) -> bool {
    state.has_permission(Role::Officer) && status.is_open()
}

/// A review decision ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ReviewAction {
    Approve { notes: Option<String> },
    Reject { reason: String },
    RequestDocuments { documents: Vec<String> },
}

/// Build a review action from the form text, or the message to show.
fn review_action(kind: &str, text: &str) -> Result<ReviewAction, &'static str> {
    let text = text.trim();
    match kind {
        "approve" => Ok(ReviewAction::Approve { notes: (!text.is_empty()).then(|| text.to_owned()) }),
        "reject" if text.is_empty() => Err("Give a reason for the rejection."),
        "reject" => Ok(ReviewAction::Reject { reason: text.to_owned() }),
        "documents" => {
            let documents = parse_document_list(text);
            if documents.is_empty() {
                Err("List at least one document.")
            } else {
                Ok(ReviewAction::RequestDocuments { documents })
            }
        }
        _ => Err("Choose an action."),
    }
}

/// Update payload that answers a document request with `documents`.
///
/// `None` unless the application is waiting on documents, its category code
/// is known, and at least one file was picked.
fn document_update(application: &LicenseApplication, documents: Vec<Attachment>) -> Option<ApplicationForm> {
    if documents.is_empty() || application.status != ApplicationStatus::DocumentsRequested {
        return None;
    }
    Some(ApplicationForm {
        citizen_id: application.citizen_id.clone(),
        category: LicenseCategory::from_code(&application.category)?,
        application_type: application.application_type,
        notes: application.notes.clone(),
        supporting_documents: documents,
    })
}

#[component]
pub fn ApplicationsPage(#[prop(optional)] pending_only: bool) -> impl IntoView {
    let (service, auth) = use_auth();

    let filter = RwSignal::new(if pending_only { ListFilter::Pending } else { ListFilter::All });
    let rows = RwSignal::new(Vec::<LicenseApplication>::new());
    let total = RwSignal::new(0_u64);
    let page = RwSignal::new(1_u32);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let latest = LatestRequest::default();

    Effect::new(move || {
        let current_filter = filter.get();
        let current_page = page.get();
        loading.set(true);
        let ticket = latest.begin();
        let latest = latest.clone();
        let service = Arc::clone(&service);
        spawn_task(async move {
            let api = service.api();
            let result = match current_filter {
                ListFilter::All => applications::list(api, current_page, PAGE_SIZE).await,
                ListFilter::Pending => applications::pending(api, current_page, PAGE_SIZE).await,
            };
            if !latest.is_current(ticket) {
                return;
            }
            match result {
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

    let select = move |next: ListFilter| {
        filter.set(next);
        page.set(1);
    };

    view! {
        <section class="records">
            <header class="records__header">
                <h1>{move || if filter.get() == ListFilter::Pending { "Review queue" } else { "Applications" }}</h1>
                <A href="/applications/new" attr:class="btn btn--primary">"New application"</A>
            </header>
            <Show when=move || auth.get().has_permission(Role::Officer)>
                <div class="records__filters">
                    <button
                        class="btn btn--ghost"
                        class:btn--active=move || filter.get() == ListFilter::All
                        on:click=move |_| select(ListFilter::All)
                    >
                        "All"
                    </button>
                    <button
                        class="btn btn--ghost"
                        class:btn--active=move || filter.get() == ListFilter::Pending
                        on:click=move |_| select(ListFilter::Pending)
                    >
                        "Pending"
                    </button>
                </div>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="records__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="records__loading">"Loading..."</p> }>
                <table class="records__table">
                    <thead>
                        <tr>
                            <th>"Submitted"</th>
                            <th>"Type"</th>
                            <th>"Category"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|application| {
                                    let href = format!("/applications/{}", application.id);
                                    view! {
                                        <tr>
                                            <td>
                                                <A href=href>{application.created_at.clone()}</A>
                                            </td>
                                            <td>{application.application_type.label()}</td>
                                            <td>{application.category.clone()}</td>
                                            <td>
                                                <StatusBadge status=application.status/>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class="records__empty">"No applications found."</p>
                </Show>
            </Show>
            <Pagination page=page total_pages=Signal::derive(move || total_pages(total.get(), PAGE_SIZE))/>
        </section>
    }
}

#[component]
pub fn ApplicationDetailPage() -> impl IntoView {
    let (service, auth) = use_auth();
    let params = use_params_map();
    let application_id = move || params.read().get("id").unwrap_or_default();

    let application = RwSignal::new(None::<LicenseApplication>);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let action_kind = RwSignal::new("approve".to_owned());
    let action_text = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let deleted = RwSignal::new(false);
    let uploads = RwSignal::new(Vec::<Attachment>::new());
    // Bumped after a successful action to re-fetch the record.
    let revision = RwSignal::new(0_u32);

    let load_service = Arc::clone(&service);
    Effect::new(move || {
        revision.track();
        let id = application_id();
        if id.is_empty() {
            return;
        }
        let service = Arc::clone(&load_service);
        spawn_task(async move {
            match applications::get(service.api(), &id).await {
                Ok(found) => {
                    application.set(Some(found));
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    let reviewable = move || application.get().is_some_and(|a| can_review(&auth.get(), a.status));

    let review_service = Arc::clone(&service);
    let on_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let action = match review_action(&action_kind.get(), &action_text.get()) {
            Ok(action) => action,
            Err(message) => {
                notice.set(Some(message.to_owned()));
                return;
            }
        };
        let id = application_id();
        busy.set(true);
        notice.set(None);
        let service = Arc::clone(&review_service);
        spawn_task(async move {
            let api = service.api();
            let result: Result<serde_json::Value, ApiError> = match &action {
                ReviewAction::Approve { notes } => applications::approve(api, &id, notes.as_deref()).await,
                ReviewAction::Reject { reason } => applications::reject(api, &id, reason).await,
                ReviewAction::RequestDocuments { documents } => {
                    applications::request_documents(api, &id, documents).await
                }
            };
            match result {
                Ok(_) => {
                    notice.set(Some("Decision recorded.".to_owned()));
                    action_text.set(String::new());
                    revision.update(|r| *r += 1);
                }
                Err(e) => notice.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    };

    let awaiting_documents =
        move || application.with(|a| a.as_ref().is_some_and(|a| a.status == ApplicationStatus::DocumentsRequested));

    let on_pick_documents = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(files) = input.files() else {
                return;
            };
            spawn_task(async move {
                let picked = crate::pages::read_attachments(files).await;
                uploads.update(|u| u.extend(picked));
                input.set_value("");
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let upload_service = Arc::clone(&service);
    let on_upload = move |_| {
        if busy.get() {
            return;
        }
        let Some(form) = application.with(|a| a.as_ref().and_then(|a| document_update(a, uploads.get()))) else {
            notice.set(Some("Pick at least one file to upload.".to_owned()));
            return;
        };
        let id = application_id();
        busy.set(true);
        notice.set(None);
        let service = Arc::clone(&upload_service);
        spawn_task(async move {
            match applications::update(service.api(), &id, &form).await {
                Ok(_) => {
                    notice.set(Some("Documents uploaded.".to_owned()));
                    uploads.set(Vec::new());
                    revision.update(|r| *r += 1);
                }
                Err(e) => notice.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    };

    let on_delete = move |_| {
        let id = application_id();
        let service = Arc::clone(&service);
        spawn_task(async move {
            match applications::delete(service.api(), &id).await {
                Ok(()) => deleted.set(true),
                Err(e) => notice.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <section class="record-detail">
            <Show when=move || deleted.get()>
                <Redirect path="/applications"/>
            </Show>
            <A href="/applications" attr:class="record-detail__back">"Back to applications"</A>
            {move || match (application.get(), error.get()) {
                (_, Some(message)) => view! { <p class="records__error">{message}</p> }.into_any(),
                (None, None) => view! { <p class="records__loading">"Loading..."</p> }.into_any(),
                (Some(a), None) => {
                    let citizen_href = format!("/citizens/{}", a.citizen_id);
                    let documents = a.supporting_documents.clone();
                    view! {
                        <h1>{format!("{} application", a.application_type.label())}</h1>
                        <StatusBadge status=a.status/>
                        <dl class="record-detail__fields">
                            <dt>"Category"</dt>
                            <dd>{a.category.clone()}</dd>
                            <dt>"Citizen"</dt>
                            <dd>
                                <A href=citizen_href>"View citizen"</A>
                            </dd>
                            <dt>"Submitted"</dt>
                            <dd>{a.created_at.clone()}</dd>
                            <dt>"Last updated"</dt>
                            <dd>{a.updated_at.clone()}</dd>
                            <dt>"Notes"</dt>
                            <dd>{a.notes.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                        </dl>
                        <h2>"Supporting documents"</h2>
                        <ul class="record-detail__list">
                            {documents.into_iter().map(|doc| view! { <li>{doc}</li> }).collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
            <Show when=reviewable>
                <form class="review-form" on:submit=on_review.clone()>
                    <h2>"Review"</h2>
                    <select
                        class="review-form__action"
                        prop:value=move || action_kind.get()
                        on:change=move |ev| action_kind.set(event_target_value(&ev))
                    >
                        <option value="approve">"Approve"</option>
                        <option value="reject">"Reject"</option>
                        <option value="documents">"Request documents"</option>
                    </select>
                    <textarea
                        class="review-form__text"
                        placeholder=move || match action_kind.get().as_str() {
                            "reject" => "Reason for rejection",
                            "documents" => "One document per line",
                            _ => "Notes (optional)",
                        }
                        prop:value=move || action_text.get()
                        on:input=move |ev| action_text.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Submit decision"
                    </button>
                </form>
            </Show>
            <Show when=awaiting_documents>
                <div class="record-detail__upload">
                    <h2>"Upload requested documents"</h2>
                    <input class="wizard__files" type="file" multiple=true on:change=on_pick_documents/>
                    <ul class="wizard__documents">
                        {move || {
                            uploads
                                .with(|u| u.iter().map(|d| d.file_name.clone()).collect::<Vec<_>>())
                                .into_iter()
                                .map(|name| view! { <li>{name}</li> })
                                .collect_view()
                        }}
                    </ul>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=on_upload.clone()>
                        "Upload documents"
                    </button>
                </div>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="record-detail__notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || auth.get().has_permission(Role::Manager)>
                <div class="record-detail__actions">
                    <button class="btn btn--danger" on:click=on_delete.clone()>
                        "Delete application"
                    </button>
                </div>
            </Show>
        </section>
    }
}
