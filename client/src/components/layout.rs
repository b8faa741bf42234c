//! Application chrome for signed-in pages: navigation, user badge, logout.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Role;
use crate::state::AppAuth;
use crate::state::auth::AuthState;

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = expect_context::<Arc<AppAuth>>();

    let user_name = move || auth.get().user.map(|u| u.label().to_owned()).unwrap_or_default();
    let user_role = move || auth.get().user.map(|u| u.role.label()).unwrap_or_default();
    let can_review = move || auth.get().has_permission(Role::Officer);

    // The guard around this layout redirects to /login once the signal flips.
    let on_logout = move |_| {
        service.logout();
        auth.set(service.state());
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <A href="/" attr:class="app-header__brand">"AMPRO Licence Administration"</A>
                <nav class="app-nav">
                    <A href="/">"Dashboard"</A>
                    <A href="/citizens">"Citizens"</A>
                    <A href="/licenses">"Licenses"</A>
                    <A href="/applications">"Applications"</A>
                    <Show when=can_review>
                        <A href="/applications/pending">"Review queue"</A>
                    </Show>
                </nav>
                <div class="app-header__user">
                    <span class="app-header__name">{user_name}</span>
                    <span class="app-header__role">{user_role}</span>
                    <button class="btn btn--ghost" on:click=on_logout>
                        "Log out"
                    </button>
                </div>
            </header>
            <main class="app-main">{children()}</main>
        </div>
    }
}
