use super::*;
use crate::net::types::UserProfile;

// =============================================================
// Helpers
// =============================================================

fn signed_in(role: Role) -> AuthState {
    AuthState::authenticated(UserProfile {
        id: "u1".to_owned(),
        email: "a@b.com".to_owned(),
        display_name: "Ann".to_owned(),
        role,
    })
}

const ADMIN_ONLY: RouteDescriptor = protected("/settings", Page::Dashboard, Some(Role::Admin));

// =============================================================
// resolve
// =============================================================

#[test]
fn resolve_matches_static_routes() {
    assert_eq!(resolve("/").page, Page::Dashboard);
    assert_eq!(resolve("/login").page, Page::Login);
    assert_eq!(resolve("/citizens").page, Page::Citizens);
    assert_eq!(resolve("/licenses/").page, Page::Licenses);
}

#[test]
fn resolve_matches_parameter_segments() {
    assert_eq!(resolve("/citizens/42").page, Page::CitizenDetail);
    assert_eq!(resolve("/licenses/L-9").page, Page::LicenseDetail);
    assert_eq!(resolve("/applications/a1").page, Page::ApplicationDetail);
}

#[test]
fn resolve_prefers_literal_application_routes_over_id() {
    assert_eq!(resolve("/applications/new").page, Page::NewApplication);
    assert_eq!(resolve("/applications/pending").page, Page::PendingApplications);
}

#[test]
fn resolve_citizen_form_routes() {
    assert_eq!(resolve("/citizens/new").page, Page::NewCitizen);
    assert_eq!(resolve("/citizens/c1/edit").page, Page::EditCitizen);
    assert_eq!(resolve("/citizens/c1").page, Page::CitizenDetail);
}

#[test]
fn resolve_ignores_query_and_fragment() {
    assert_eq!(resolve("/citizens?page=2").page, Page::Citizens);
    assert_eq!(resolve("/applications/a1#notes").page, Page::ApplicationDetail);
}

#[test]
fn resolve_falls_back_to_not_found() {
    assert_eq!(resolve("/nope").page, Page::NotFound);
    assert_eq!(resolve("/citizens/1/extra").page, Page::NotFound);
    assert_eq!(resolve("/citizens/1/edit/more").page, Page::NotFound);
    assert!(!resolve("/nope").protected);
}

#[test]
fn route_table_requires_clerk_for_records() {
    let paths = [
        "/citizens",
        "/citizens/new",
        "/citizens/1",
        "/citizens/1/edit",
        "/licenses",
        "/licenses/1",
        "/applications",
        "/applications/new",
        "/applications/1",
    ];
    for path in paths {
        let route = resolve(path);
        assert!(route.protected, "{path}");
        assert_eq!(route.required_role, Some(Role::Clerk), "{path}");
    }
    assert_eq!(resolve("/").required_role, None);
    assert!(resolve("/").protected);
}

// =============================================================
// decide
// =============================================================

#[test]
fn loading_placeholder_while_initializing_for_every_protected_route() {
    let state = AuthState::default();
    for route in ROUTES.iter().filter(|r| r.protected) {
        assert_eq!(decide(&state, route), GuardDecision::Loading, "{}", route.path);
    }
}

#[test]
fn unauthenticated_citizens_navigation_redirects_to_login() {
    assert_eq!(decide(&AuthState::unauthenticated(), resolve("/citizens")), GuardDecision::Redirect("/login"));
}

#[test]
fn unauthenticated_home_navigation_redirects_to_login() {
    assert_eq!(decide(&AuthState::unauthenticated(), resolve("/")), GuardDecision::Redirect(LOGIN_PATH));
}

#[test]
fn clerk_on_admin_route_redirects_home() {
    assert_eq!(decide(&signed_in(Role::Clerk), &ADMIN_ONLY), GuardDecision::Redirect("/"));
}

#[test]
fn clerk_on_officer_queue_redirects_home() {
    assert_eq!(
        decide(&signed_in(Role::Clerk), resolve("/applications/pending")),
        GuardDecision::Redirect(HOME_PATH)
    );
}

#[test]
fn sufficient_role_renders() {
    assert_eq!(decide(&signed_in(Role::Clerk), resolve("/citizens/7")), GuardDecision::Render);
    assert_eq!(decide(&signed_in(Role::Officer), resolve("/applications/pending")), GuardDecision::Render);
    assert_eq!(decide(&signed_in(Role::Admin), &ADMIN_ONLY), GuardDecision::Render);
}

#[test]
fn any_signed_in_user_renders_unrestricted_route() {
    assert_eq!(decide(&signed_in(Role::Clerk), resolve("/")), GuardDecision::Render);
}

#[test]
fn public_routes_render_in_every_phase() {
    for state in [AuthState::default(), AuthState::unauthenticated(), signed_in(Role::Clerk)] {
        assert_eq!(decide(&state, resolve("/login")), GuardDecision::Render);
        assert_eq!(decide(&state, resolve("/missing")), GuardDecision::Render);
    }
}

#[test]
fn authenticated_phase_without_user_is_treated_as_signed_out() {
    let state = AuthState { phase: AuthPhase::Authenticated, user: None };
    assert_eq!(decide(&state, resolve("/")), GuardDecision::Redirect(LOGIN_PATH));
}

// =============================================================
// login_redirect
// =============================================================

#[test]
fn login_redirect_sends_signed_in_user_home() {
    assert_eq!(login_redirect(&signed_in(Role::Clerk)), Some("/"));
    assert_eq!(login_redirect(&AuthState::unauthenticated()), None);
    assert_eq!(login_redirect(&AuthState::default()), None);
}
