//! Login page: email + password against the gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. A visitor who is already signed in is sent to `/`. On
//! success the mirrored auth signal flips to authenticated and the same
//! redirect fires; on failure the message is shown inline and the form
//! stays usable.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::pages::{spawn_task, use_auth};
use crate::util::auth::login_redirect;

/// Trim the email and require both fields before any request is made.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (service, auth) = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if let Some(path) = login_redirect(&auth.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        let service = Arc::clone(&service);
        spawn_task(async move {
            if let Err(e) = service.login(&email_value, &password_value).await {
                error.set(Some(e.user_message()));
            }
            auth.set(service.state());
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"AMPRO Licence Administration"</h1>
                <p class="login-card__subtitle">"Sign in with your staff account"</p>
                <form class="login-form" on:submit=on_submit>
                    <label class="field">
                        <span class="field__label">"Email"</span>
                        <input
                            class="login-input"
                            type="email"
                            autocomplete="username"
                            placeholder="you@example.gov"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span class="field__label">"Password"</span>
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
