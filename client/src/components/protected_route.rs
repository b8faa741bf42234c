//! Route wrapper that admits, defers, or redirects a navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected page in `app.rs`. The decision comes from
//! `util::auth::decide` over the mirrored `RwSignal<AuthState>` and the
//! current pathname, so it re-evaluates when either changes. Admitted pages
//! render inside `MainLayout`.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::components::layout::MainLayout;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, decide, resolve};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let decision = Memo::new(move |_| {
        let path = location.pathname.get();
        decide(&auth.get(), resolve(&path))
    });

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardDecision::Render => {
            let children = children.clone();
            view! { <MainLayout>{children()}</MainLayout> }.into_any()
        }
    }
}

/// Full-page placeholder shown while auth initializes.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-screen__spinner"></div>
            <p>"Loading..."</p>
        </div>
    }
}
