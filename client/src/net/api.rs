//! Authentication endpoints under `/api/v1/auth`.
//!
//! Token refresh lives in the gateway (`net::client`) because it is part of
//! the 401 policy rather than something pages call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::ApiClient;
use super::error::ApiError;
use super::http::{HttpRequest, Transport};
use super::types::{LoginRequest, LoginResponse, UserProfile};
use crate::state::session::SessionStorage;

pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const CURRENT_USER_PATH: &str = "/api/v1/auth/me";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Exchange credentials for tokens and the user's profile.
///
/// Sent without a bearer and outside the refresh policy, so a rejected
/// password never triggers a token refresh.
///
/// # Errors
///
/// Returns `ApiError::Status` when the server rejects the credentials (with
/// the server's message, or "Invalid email or password"), `Decode` for an
/// unexpected body, or a transport error.
pub async fn login<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let request = HttpRequest::post(LOGIN_PATH).with_json(&LoginRequest { email, password })?;
    api.send_public(request).await?.error_for_status(INVALID_CREDENTIALS)?.json()
}

/// Fetch the profile behind the stored access token.
///
/// # Errors
///
/// Returns any error from the gateway; a 401 that survives the refresh
/// policy comes back as `ApiError::Status`.
pub async fn fetch_current_user<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>) -> Result<UserProfile, ApiError> {
    api.get_json(CURRENT_USER_PATH).await
}
