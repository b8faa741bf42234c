//! Dashboard page: the signed-in landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Greets the user and links to the record areas their role can reach.
//! Officers and above also see the size of the review queue.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::applications;
use crate::net::types::Role;
use crate::pages::{spawn_task, use_auth};

/// Landing card: route, title, blurb, and the role it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QuickLink {
    href: &'static str,
    title: &'static str,
    blurb: &'static str,
    role: Role,
}

const QUICK_LINKS: &[QuickLink] = &[
    QuickLink { href: "/citizens", title: "Citizens", blurb: "Search and view citizen records.", role: Role::Clerk },
    QuickLink { href: "/licenses", title: "Licenses", blurb: "Browse issued driver's licenses.", role: Role::Clerk },
    QuickLink {
        href: "/applications",
        title: "Applications",
        blurb: "Track license applications.",
        role: Role::Clerk,
    },
    QuickLink {
        href: "/applications/new",
        title: "New application",
        blurb: "Capture an application for a citizen.",
        role: Role::Clerk,
    },
    QuickLink {
        href: "/applications/pending",
        title: "Review queue",
        blurb: "Approve, reject, or request documents.",
        role: Role::Officer,
    },
];

/// Cards visible to `role`, in display order.
fn quick_links_for(role: Role) -> Vec<QuickLink> {
    QUICK_LINKS.iter().copied().filter(|link| role.satisfies(link.role)).collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (service, auth) = use_auth();
    let pending_total = RwSignal::new(None::<u64>);

    let user = move || auth.get().user;
    let greeting = move || user().map(|u| format!("Welcome, {}", u.label())).unwrap_or_default();
    let links = move || user().map(|u| quick_links_for(u.role)).unwrap_or_default();

    if auth.get_untracked().has_permission(Role::Officer) {
        let service = Arc::clone(&service);
        spawn_task(async move {
            match applications::pending(service.api(), 1, 1).await {
                Ok(page) => pending_total.set(Some(page.total)),
                Err(e) => leptos::logging::warn!("pending count failed: {e}"),
            }
        });
    }

    view! {
        <section class="dashboard">
            <h1>{greeting}</h1>
            <Show when=move || pending_total.get().is_some()>
                <p class="dashboard__queue">
                    {move || format!("{} application(s) awaiting review", pending_total.get().unwrap_or_default())}
                </p>
            </Show>
            <div class="dashboard__grid">
                {move || {
                    links()
                        .into_iter()
                        .map(|link| {
                            view! {
                                <A href=link.href attr:class="dashboard-card">
                                    <h2>{link.title}</h2>
                                    <p>{link.blurb}</p>
                                </A>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
