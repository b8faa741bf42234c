//! API gateway: the single egress point for REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page request goes through `ApiClient::send`, which applies two
//! policies on top of the raw `Transport`:
//!
//! 1. Request: attach `Authorization: Bearer <token>` when a token is stored.
//! 2. Response: on 401, refresh the access token once and retry the request
//!    once. A 401 on the retry is returned as-is.
//!
//! CONCURRENCY
//! ===========
//! Refreshes are single-flight. Concurrent 401s queue on `refresh_lock`; the
//! first one refreshes, later ones see that the stored token has moved on and
//! retry with it. If the refresh failed the session is gone and the waiters
//! fail with `SessionExpired`.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use futures::lock::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{HttpRequest, HttpResponse, Multipart, Transport};
use super::types::{RefreshRequest, RefreshResponse};
use crate::state::session::{SessionStorage, SessionStore};

pub const REFRESH_PATH: &str = "/api/v1/auth/token";

const UNAUTHORIZED: u16 = 401;
const REQUEST_FAILED: &str = "request failed";

/// Called after a failed refresh has cleared the session.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

pub struct ApiClient<T, S> {
    transport: Arc<T>,
    session: Arc<SessionStore<S>>,
    refresh_lock: Arc<Mutex<()>>,
    on_session_expired: SessionExpiredHook,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: Arc::clone(&self.session),
            refresh_lock: Arc::clone(&self.refresh_lock),
            on_session_expired: Arc::clone(&self.on_session_expired),
        }
    }
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self {
            transport: Arc::new(transport),
            session: Arc::new(session),
            refresh_lock: Arc::new(Mutex::new(())),
            on_session_expired: Arc::new(|| {}),
        }
    }

    /// Replace the hook run after a refresh failure clears the session.
    #[must_use]
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Arc::new(hook);
        self
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatch `request` with the bearer and 401 policies applied.
    ///
    /// Any status other than a handled 401 comes back as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged, or `RefreshFailed` /
    /// `SessionExpired` when a 401 could not be recovered by refreshing.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let sent_token = self.session.access_token();
        let outbound = match &sent_token {
            Some(token) => request.clone().with_bearer(token),
            None => request.clone(),
        };
        let response = self.transport.send(outbound).await?;
        if response.status != UNAUTHORIZED {
            return Ok(response);
        }
        if self.session.refresh_token().is_none() {
            return Ok(response);
        }

        let token = self.refreshed_token(sent_token.as_deref()).await?;
        self.transport.send(request.with_bearer(&token)).await
    }

    /// Dispatch without credentials and without 401 handling.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged.
    pub async fn send_public(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.send(request).await
    }

    /// Return an access token newer than `stale`, refreshing at most once
    /// across all concurrent callers.
    async fn refreshed_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        match self.session.access_token() {
            Some(current) if Some(current.as_str()) != stale => return Ok(current),
            None if stale.is_some() => return Err(ApiError::SessionExpired),
            _ => {}
        }
        let Some(refresh_token) = self.session.refresh_token() else {
            return Err(ApiError::SessionExpired);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(access_token) => {
                self.session.save_access_token(&access_token);
                leptos::logging::log!("auth: access token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                leptos::logging::warn!("auth: token refresh failed, ending session: {e}");
                self.session.clear();
                (self.on_session_expired)();
                Err(ApiError::RefreshFailed(Box::new(e)))
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let request = HttpRequest::post(REFRESH_PATH).with_json(&RefreshRequest { refresh_token })?;
        let response = self.transport.send(request).await?.error_for_status("token refresh rejected")?;
        let body: RefreshResponse = response.json()?;
        Ok(body.access_token)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx answers, `Decode` for bodies
    /// that do not parse, or any error from `send`.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::get(path)).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn get_json_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, ApiError> {
        let request = query
            .iter()
            .fold(HttpRequest::get(path), |req, (key, value)| req.with_query(key, value));
        self.fetch_json(request).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`], plus `Encode` if `body` cannot be
    /// serialized.
    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::post(path).with_json(body)?).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::post_json`].
    pub async fn put_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::put(path).with_json(body)?).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn post_multipart<R: DeserializeOwned>(&self, path: &str, form: Multipart) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::post(path).with_multipart(form)).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn put_multipart<R: DeserializeOwned>(&self, path: &str, form: Multipart) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::put(path).with_multipart(form)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx answers or any error from `send`.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(HttpRequest::delete(path)).await?.error_for_status(REQUEST_FAILED)?;
        Ok(())
    }

    async fn fetch_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        self.send(request).await?.error_for_status(REQUEST_FAILED)?.json()
    }
}
