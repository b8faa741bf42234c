//! Licence application endpoints under `/api/v1/applications`.
//!
//! DESIGN
//! ======
//! Create and update pick their encoding from the form: with supporting
//! documents they go out as multipart (text fields plus one `files` part per
//! document), otherwise as JSON.

#[cfg(test)]
#[path = "applications_test.rs"]
mod applications_test;

use serde::de::DeserializeOwned;

use super::client::ApiClient;
use super::error::ApiError;
use super::http::{Multipart, Transport};
use super::types::{ApplicationForm, ApproveRequest, DocumentRequest, LicenseApplication, Paged, RejectRequest};
use crate::state::session::SessionStorage;

const APPLICATIONS_PATH: &str = "/api/v1/applications/";
const PENDING_PATH: &str = "/api/v1/applications/pending";

fn application_path(id: &str) -> String {
    format!("/api/v1/applications/{id}")
}

fn action_path(id: &str, action: &str) -> String {
    format!("/api/v1/applications/{id}/{action}")
}

fn citizen_applications_path(citizen_id: &str) -> String {
    format!("/api/v1/applications/citizen/{citizen_id}")
}

/// Multipart rendition of `form`, or `None` when it carries no documents.
fn multipart_form(form: &ApplicationForm) -> Option<Multipart> {
    if form.supporting_documents.is_empty() {
        return None;
    }
    let mut multipart = Multipart::default()
        .text("citizen_id", form.citizen_id.clone())
        .text("category", form.category.code())
        .text("application_type", form.application_type.code());
    if let Some(notes) = &form.notes {
        multipart = multipart.text("notes", notes.clone());
    }
    Some(
        form.supporting_documents
            .iter()
            .cloned()
            .fold(multipart, |acc, doc| acc.file("files", doc)),
    )
}

/// # Errors
///
/// Returns any gateway error.
pub async fn list<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    page: u32,
    limit: u32,
) -> Result<Paged<LicenseApplication>, ApiError> {
    api.get_json_with_query(APPLICATIONS_PATH, &[("page", page.to_string()), ("limit", limit.to_string())])
        .await
}

/// Applications still awaiting a review decision.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn pending<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    page: u32,
    limit: u32,
) -> Result<Paged<LicenseApplication>, ApiError> {
    api.get_json_with_query(PENDING_PATH, &[("page", page.to_string()), ("limit", limit.to_string())])
        .await
}

/// # Errors
///
/// Returns any gateway error; an unknown id is `ApiError::Status` 404.
pub async fn get<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    id: &str,
) -> Result<LicenseApplication, ApiError> {
    api.get_json(&application_path(id)).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn create<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    form: &ApplicationForm,
) -> Result<LicenseApplication, ApiError> {
    match multipart_form(form) {
        Some(multipart) => api.post_multipart(APPLICATIONS_PATH, multipart).await,
        None => api.post_json(APPLICATIONS_PATH, form).await,
    }
}

/// # Errors
///
/// Returns any gateway error.
pub async fn update<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    id: &str,
    form: &ApplicationForm,
) -> Result<LicenseApplication, ApiError> {
    let path = application_path(id);
    match multipart_form(form) {
        Some(multipart) => api.put_multipart(&path, multipart).await,
        None => api.put_json(&path, form).await,
    }
}

/// # Errors
///
/// Returns any gateway error.
pub async fn delete<T: Transport, S: SessionStorage>(api: &ApiClient<T, S>, id: &str) -> Result<(), ApiError> {
    api.delete(&application_path(id)).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn approve<T: Transport, S: SessionStorage, R: DeserializeOwned>(
    api: &ApiClient<T, S>,
    id: &str,
    notes: Option<&str>,
) -> Result<R, ApiError> {
    api.post_json(&action_path(id, "approve"), &ApproveRequest { notes }).await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn reject<T: Transport, S: SessionStorage, R: DeserializeOwned>(
    api: &ApiClient<T, S>,
    id: &str,
    reason: &str,
) -> Result<R, ApiError> {
    api.post_json(&action_path(id, "reject"), &RejectRequest { reason }).await
}

/// Ask the applicant for additional documents.
///
/// # Errors
///
/// Returns any gateway error.
pub async fn request_documents<T: Transport, S: SessionStorage, R: DeserializeOwned>(
    api: &ApiClient<T, S>,
    id: &str,
    documents: &[String],
) -> Result<R, ApiError> {
    api.post_json(&action_path(id, "request-documents"), &DocumentRequest { document_list: documents })
        .await
}

/// # Errors
///
/// Returns any gateway error.
pub async fn for_citizen<T: Transport, S: SessionStorage>(
    api: &ApiClient<T, S>,
    citizen_id: &str,
) -> Result<Vec<LicenseApplication>, ApiError> {
    api.get_json(&citizen_applications_path(citizen_id)).await
}
