use leptos::prelude::*;

use crate::net::types::ApplicationStatus;
use crate::util::format::{status_class, status_label};

/// Colored chip for an application status.
#[component]
pub fn StatusBadge(status: ApplicationStatus) -> impl IntoView {
    view! { <span class=status_class(status)>{status_label(status)}</span> }
}
