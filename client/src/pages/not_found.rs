use leptos::prelude::*;
use leptos_router::components::A;

/// Fallback for unknown paths. Public, so it renders in every auth phase.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>"The page you asked for does not exist."</p>
            <A href="/">"Go to the dashboard"</A>
        </section>
    }
}
