//! Route table and the per-navigation access decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page renders inside `ProtectedRoute`, which resolves the
//! current path to a `RouteDescriptor` here and asks `decide` what to do.
//! The decision reads only the current `AuthState`; the guard keeps no state
//! of its own.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Role;
use crate::state::auth::{AuthPhase, AuthState};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Screens the router can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Citizens,
    NewCitizen,
    CitizenDetail,
    EditCitizen,
    Licenses,
    LicenseDetail,
    Applications,
    PendingApplications,
    NewApplication,
    ApplicationDetail,
    NotFound,
}

/// Static route configuration.
///
/// A protected route with no `required_role` admits any signed-in user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub page: Page,
    pub protected: bool,
    pub required_role: Option<Role>,
}

const fn public(path: &'static str, page: Page) -> RouteDescriptor {
    RouteDescriptor { path, page, protected: false, required_role: None }
}

const fn protected(path: &'static str, page: Page, required_role: Option<Role>) -> RouteDescriptor {
    RouteDescriptor { path, page, protected: true, required_role }
}

/// Matched in order; literal segments must precede `:param` siblings.
pub const ROUTES: &[RouteDescriptor] = &[
    public(LOGIN_PATH, Page::Login),
    protected(HOME_PATH, Page::Dashboard, None),
    protected("/citizens", Page::Citizens, Some(Role::Clerk)),
    protected("/citizens/new", Page::NewCitizen, Some(Role::Clerk)),
    protected("/citizens/:id", Page::CitizenDetail, Some(Role::Clerk)),
    protected("/citizens/:id/edit", Page::EditCitizen, Some(Role::Clerk)),
    protected("/licenses", Page::Licenses, Some(Role::Clerk)),
    protected("/licenses/:id", Page::LicenseDetail, Some(Role::Clerk)),
    protected("/applications", Page::Applications, Some(Role::Clerk)),
    protected("/applications/new", Page::NewApplication, Some(Role::Clerk)),
    protected("/applications/pending", Page::PendingApplications, Some(Role::Officer)),
    protected("/applications/:id", Page::ApplicationDetail, Some(Role::Clerk)),
];

pub const NOT_FOUND: RouteDescriptor = public("*", Page::NotFound);

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = segments(pattern).collect();
    let path: Vec<&str> = segments(path).collect();
    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(expected, actual)| expected.starts_with(':') || expected == actual)
}

/// Route for `path`, or the not-found route.
pub fn resolve(path: &str) -> &'static RouteDescriptor {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find(|route| matches(route.path, path)).unwrap_or(&NOT_FOUND)
}

/// What the router should do for one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth is still initializing; show a placeholder and decide later.
    Loading,
    Redirect(&'static str),
    Render,
}

/// Admission check for `route` under `state`.
///
/// Unauthenticated visitors go to `/login` (the requested path is not
/// remembered). Signed-in users below the route's role go to `/`.
pub fn decide(state: &AuthState, route: &RouteDescriptor) -> GuardDecision {
    if !route.protected {
        return GuardDecision::Render;
    }
    match state.phase {
        AuthPhase::Initializing => GuardDecision::Loading,
        AuthPhase::Unauthenticated => GuardDecision::Redirect(LOGIN_PATH),
        AuthPhase::Authenticated if !state.is_authenticated() => GuardDecision::Redirect(LOGIN_PATH),
        AuthPhase::Authenticated => match route.required_role {
            Some(role) if !state.has_permission(role) => GuardDecision::Redirect(HOME_PATH),
            _ => GuardDecision::Render,
        },
    }
}

/// Where the login page should send a visitor who is already signed in.
pub fn login_redirect(state: &AuthState) -> Option<&'static str> {
    state.is_authenticated().then_some(HOME_PATH)
}
