//! Authentication state and the login/logout transitions.
//!
//! DESIGN
//! ======
//! `AuthService` is the single owner of auth transitions. It keeps a cached
//! `AuthState` for synchronous reads (route guards, nav bar) and persists
//! through the gateway's `SessionStore`. The Leptos layer mirrors the cached
//! state into an `RwSignal<AuthState>` after each transition.
//!
//! Phases move `Initializing -> {Authenticated, Unauthenticated}`, and
//! between the latter two via login/logout. Nothing returns to
//! `Initializing`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{PoisonError, RwLock};

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::Transport;
use crate::net::types::{Role, UserProfile};
use crate::state::session::{Session, SessionStorage};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Startup; the persisted session has not been examined yet.
    #[default]
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of who is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub user: Option<UserProfile>,
}

impl AuthState {
    pub fn authenticated(user: UserProfile) -> Self {
        Self { phase: AuthPhase::Authenticated, user: Some(user) }
    }

    pub fn unauthenticated() -> Self {
        Self { phase: AuthPhase::Unauthenticated, user: None }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AuthPhase::Initializing
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.user.is_some()
    }

    /// Whether the signed-in user's role meets `required`. Always false
    /// when nobody is signed in.
    pub fn has_permission(&self, required: Role) -> bool {
        match &self.user {
            Some(user) if self.phase == AuthPhase::Authenticated => user.role.satisfies(required),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Text for the login form's inline error.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(message) => message.clone(),
            AuthError::Api(e) => e.user_message(),
        }
    }
}

pub struct AuthService<T, S> {
    api: ApiClient<T, S>,
    state: RwLock<AuthState>,
}

impl<T: Transport, S: SessionStorage> AuthService<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { api, state: RwLock::new(AuthState::default()) }
    }

    /// Gateway for authenticated page requests.
    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    pub fn state(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state().user
    }

    pub fn has_permission(&self, required: Role) -> bool {
        self.state().has_permission(required)
    }

    fn set_state(&self, next: AuthState) -> AuthState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = next.clone();
        next
    }

    /// Settle the startup phase from the persisted session.
    ///
    /// A stored token plus profile restores the session without a network
    /// call. A token without a profile re-fetches `/auth/me`. Anything else,
    /// or a failed re-fetch, ends unauthenticated with the session cleared.
    /// Runs once; later calls return the current state unchanged. A login
    /// or logout that lands while the re-fetch is in flight wins, and the
    /// late `/auth/me` result is dropped without touching storage.
    pub async fn initialize(&self) -> AuthState {
        if !self.is_loading() {
            return self.state();
        }

        let session = self.api.session().load();
        let next = match session {
            Session { access_token: Some(_), user: Some(user), .. } => {
                leptos::logging::log!("auth: restored session for {}", user.email);
                AuthState::authenticated(user)
            }
            Session { access_token: Some(_), user: None, .. } => {
                let fetched = api::fetch_current_user(&self.api).await;
                return self.settle_refetch(fetched);
            }
            _ => AuthState::unauthenticated(),
        };
        self.set_state(next)
    }

    fn settle_refetch(&self, fetched: Result<UserProfile, ApiError>) -> AuthState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.is_loading() {
            leptos::logging::log!("auth: startup profile fetch superseded");
            return state.clone();
        }
        let next = match fetched {
            Ok(user) => {
                self.api.session().save_user(&user);
                AuthState::authenticated(user)
            }
            Err(e) => {
                leptos::logging::warn!("auth: stored token could not be used: {e}");
                self.api.session().clear();
                AuthState::unauthenticated()
            }
        };
        *state = next.clone();
        next
    }

    /// Sign in and persist the new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the server rejects the
    /// credentials, or `AuthError::Api` for any other failure. Either way the
    /// persisted session is cleared and the state is unauthenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        match api::login(&self.api, email, password).await {
            Ok(resp) => {
                self.api.session().clear();
                self.api.session().save(&Session {
                    access_token: Some(resp.access_token),
                    refresh_token: Some(resp.refresh_token),
                    user: Some(resp.user.clone()),
                });
                leptos::logging::log!("auth: signed in as {} ({})", resp.user.email, resp.user.role.label());
                self.set_state(AuthState::authenticated(resp.user.clone()));
                Ok(resp.user)
            }
            Err(e) => {
                self.api.session().clear();
                self.set_state(AuthState::unauthenticated());
                leptos::logging::warn!("auth: sign-in failed: {e}");
                Err(match e {
                    ApiError::Status { status: 400 | 401 | 403, message } => AuthError::InvalidCredentials(message),
                    other => AuthError::Api(other),
                })
            }
        }
    }

    /// Drop the session. Navigating to the login view is up to the caller.
    pub fn logout(&self) {
        self.api.session().clear();
        self.set_state(AuthState::unauthenticated());
        leptos::logging::log!("auth: signed out");
    }
}
