//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped fetches and form state and delegates
//! shared chrome to `components`. Fetches run in the browser only; the
//! server render shows each page's loading state.

pub mod applications;
pub mod citizen_edit;
pub mod citizens;
pub mod dashboard;
pub mod licenses;
pub mod login;
pub mod new_application;
pub mod not_found;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;

use crate::state::AppAuth;
use crate::state::auth::AuthState;

/// Auth service and mirrored auth signal from context.
pub(crate) fn use_auth() -> (Arc<AppAuth>, RwSignal<AuthState>) {
    (expect_context::<Arc<AppAuth>>(), expect_context::<RwSignal<AuthState>>())
}

/// Read every picked file into memory. Unreadable files are skipped.
#[cfg(feature = "hydrate")]
pub(crate) async fn read_attachments(files: web_sys::FileList) -> Vec<crate::net::types::Attachment> {
    let mut attachments = Vec::new();
    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => attachments.push(crate::net::types::Attachment {
                file_name: file.name(),
                content_type: file.type_(),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            }),
            Err(e) => leptos::logging::warn!("could not read {}: {e:?}", file.name()),
        }
    }
    attachments
}

/// Run a page task on the browser's event loop. Dropped during SSR.
pub(crate) fn spawn_task(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}
