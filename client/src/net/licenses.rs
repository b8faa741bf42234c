//! Issued-licence endpoints under `/api/v1/licenses`.

use super::client::ApiClient;
use super::error::ApiError;
use super::http::Transport;
use super::types::{License, Paged};
use crate::state::session::SessionStorage;

const LICENSES_PATH: &str = "/api/v1/licenses/";

/// # Errors
///
/// Returns any gateway error.
pub async fn list<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    page: u32,
    limit: u32,
) -> Result<Paged<License>, ApiError> {
    api.get_json_with_query(LICENSES_PATH, &[("page", page.to_string()), ("limit", limit.to_string())])
        .await
}

/// # Errors
///
/// Returns any gateway error; an unknown id is `ApiError::Status` 404.
pub async fn get<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>, id: &str) -> Result<License, ApiError> {
    api.get_json(&format!("{LICENSES_PATH}{id}")).await
}
