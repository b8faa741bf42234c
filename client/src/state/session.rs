//! Persisted session: tokens and the signed-in profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the only writer of the three storage keys below. The
//! auth service reads it once at startup; the API gateway reads the tokens on
//! every request and writes the access token after a refresh.
//!
//! The keys are a compatibility contract with sessions saved by earlier
//! builds, so they must not change.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::net::types::UserProfile;

pub const ACCESS_TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Origin-scoped string key/value storage.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Reads yield `None` and writes no-op outside the
/// browser so SSR renders stay deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { entries: Mutex::new(map) }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Authentication state as persisted between page loads.
///
/// Invariant: `user` is only present alongside `access_token`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Reads and writes the session through a `SessionStorage`.
#[derive(Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write each present field as its own entry. Absent fields are left as
    /// they are in storage.
    pub fn save(&self, session: &Session) {
        if let Some(token) = &session.access_token {
            self.storage.set(ACCESS_TOKEN_KEY, token);
        }
        if let Some(token) = &session.refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, token);
        }
        if let Some(user) = &session.user {
            self.save_user(user);
        }
    }

    pub fn save_access_token(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token);
    }

    pub fn save_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => leptos::logging::warn!("session: could not serialize profile: {e}"),
        }
    }

    /// Read the persisted session.
    ///
    /// A stored profile is dropped when there is no access token, and an
    /// unreadable profile is treated as absent.
    pub fn load(&self) -> Session {
        let access_token = self.access_token();
        let refresh_token = self.refresh_token();
        let user = access_token.as_ref().and_then(|_| self.user());
        Session { access_token, refresh_token, user }
    }

    pub fn access_token(&self) -> Option<String> {
        non_empty(self.storage.get(ACCESS_TOKEN_KEY))
    }

    pub fn refresh_token(&self) -> Option<String> {
        non_empty(self.storage.get(REFRESH_TOKEN_KEY))
    }

    fn user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                leptos::logging::warn!("session: ignoring unreadable stored profile: {e}");
                None
            }
        }
    }

    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
