//! Error taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! The gateway only intervenes on 401. Every other failure reaches the
//! calling page as one of these variants, and the page decides how to show it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
    #[error("not available outside the browser")]
    Unavailable,
    #[error("session expired")]
    SessionExpired,
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<ApiError>),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to sign in again before retrying.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::RefreshFailed(_))
    }

    /// Short text suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::SessionExpired | ApiError::RefreshFailed(_) => "Your session has ended. Sign in again.".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ".."}` and `{"detail": ".."}` JSON shapes and falls
/// back to `fallback` for anything else.
pub(crate) fn extract_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail"]
                .iter()
                .find_map(|key| value.get(key).and_then(serde_json::Value::as_str).map(str::to_owned))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}
