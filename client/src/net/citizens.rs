//! Citizen registry endpoints under `/api/v1/citizens`.

#[cfg(test)]
#[path = "citizens_test.rs"]
mod citizens_test;

use super::client::ApiClient;
use super::error::ApiError;
use super::http::Transport;
use super::types::{Citizen, CitizenForm, License, Paged};
use crate::state::session::SessionStorage;

const CITIZENS_PATH: &str = "/api/v1/citizens/";
const SEARCH_PATH: &str = "/api/v1/citizens/search";

fn citizen_path(id: &str) -> String {
    format!("/api/v1/citizens/{id}")
}

fn citizen_licenses_path(id: &str) -> String {
    format!("/api/v1/citizens/{id}/licenses")
}

fn external_record_path(id_number: &str) -> String {
    format!("/api/v1/external/citizen/{id_number}")
}

fn page_query(page: u32, limit: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("limit", limit.to_string())]
}

/// # Errors
///
/// Returns any gateway error.
pub async fn list<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    page: u32,
    limit: u32,
) -> Result<Paged<Citizen>, ApiError> {
    api.get_json_with_query(CITIZENS_PATH, &page_query(page, limit)).await
}

/// # Errors
///
/// Returns any gateway error; an unknown id is `ApiError::Status` 404.
pub async fn get<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>, id: &str) -> Result<Citizen, ApiError> {
    api.get_json(&citizen_path(id)).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn create<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    form: &CitizenForm,
) -> Result<Citizen, ApiError> {
    api.post_json(CITIZENS_PATH, form).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn update<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    id: &str,
    form: &CitizenForm,
) -> Result<Citizen, ApiError> {
    api.put_json(&citizen_path(id), form).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn delete<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>, id: &str) -> Result<(), ApiError> {
    api.delete(&citizen_path(id)).await
}

/// Free-text search by name or ID number.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn search<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    query: &str,
) -> Result<Vec<Citizen>, ApiError> {
    api.get_json_with_query(SEARCH_PATH, &[("query", query.to_owned())]).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn licenses<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    id: &str,
) -> Result<Vec<License>, ApiError> {
    api.get_json(&citizen_licenses_path(id)).await
}

/// Look up a citizen in the external population register.
///
/// The register's payload shape is not ours, so it stays untyped JSON.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn external_record<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    id_number: &str,
) -> Result<serde_json::Value, ApiError> {
    api.get_json(&external_record_path(id_number)).await
}
