//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::client::ApiClient;
use crate::net::http::BrowserTransport;
use crate::pages::{
    applications::{ApplicationDetailPage, ApplicationsPage},
    citizen_edit::{EditCitizenPage, NewCitizenPage},
    citizens::{CitizenDetailPage, CitizensPage},
    dashboard::DashboardPage,
    licenses::{LicenseDetailPage, LicensesPage},
    login::LoginPage,
    new_application::NewApplicationPage,
    not_found::NotFoundPage,
};
use crate::state::AppAuth;
use crate::state::auth::{AuthService, AuthState};
use crate::state::session::{BrowserStorage, SessionStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Build the auth service over the browser transport and `localStorage`.
///
/// A failed token refresh sends the browser to the login page; the reload
/// re-initializes auth from the now-empty session.
pub fn auth_service(config: &ClientConfig) -> AppAuth {
    let api = ApiClient::new(BrowserTransport::new(config), SessionStore::new(BrowserStorage)).on_session_expired(|| {
        leptos::logging::warn!("session expired; redirecting to login");
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(crate::util::auth::LOGIN_PATH);
            }
        }
    });
    AuthService::new(api)
}

/// Root application component.
///
/// Provides the auth service and its mirrored state signal, starts auth
/// initialization in the browser, and sets up routing. Every route except
/// `/login` and the fallback renders through `ProtectedRoute`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let service = Arc::new(auth_service(&ClientConfig::from_build_env()));
    let auth = RwSignal::new(AuthState::default());

    provide_context(Arc::clone(&service));
    provide_context(auth);

    // The server render stays `Initializing`; the browser settles the phase.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let state = service.initialize().await;
        auth.set(state);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = service;

    view! {
        <Stylesheet id="leptos" href="/pkg/licensing-admin.css"/>
        <Title text="AMPRO Licence Administration"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("citizens")
                    view=|| view! { <ProtectedRoute><CitizensPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("citizens"), StaticSegment("new"))
                    view=|| view! { <ProtectedRoute><NewCitizenPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("citizens"), ParamSegment("id"))
                    view=|| view! { <ProtectedRoute><CitizenDetailPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("citizens"), ParamSegment("id"), StaticSegment("edit"))
                    view=|| view! { <ProtectedRoute><EditCitizenPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("licenses")
                    view=|| view! { <ProtectedRoute><LicensesPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("licenses"), ParamSegment("id"))
                    view=|| view! { <ProtectedRoute><LicenseDetailPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("applications")
                    view=|| view! { <ProtectedRoute><ApplicationsPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("applications"), StaticSegment("new"))
                    view=|| view! { <ProtectedRoute><NewApplicationPage/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("applications"), StaticSegment("pending"))
                    view=|| view! { <ProtectedRoute><ApplicationsPage pending_only=true/></ProtectedRoute> }
                />
                <Route
                    path=(StaticSegment("applications"), ParamSegment("id"))
                    view=|| view! { <ProtectedRoute><ApplicationDetailPage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
