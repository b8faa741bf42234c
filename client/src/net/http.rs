//! Transport port: the request/response model every REST call goes through.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway (`net::client`) owns auth policy and talks to a `Transport`.
//! In the browser that is `BrowserTransport` (`gloo-net`); tests swap in an
//! in-memory mock so the policy can be exercised natively.
//!
//! TRADE-OFFS
//! ==========
//! Bodies are buffered as text. Every endpoint returns JSON, and keeping the
//! response model owned and `Clone` keeps the mock trivial.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, extract_message};
use super::types::Attachment;
use crate::config::ClientConfig;

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Multipart payload: plain text fields plus named file parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Multipart {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, Attachment)>,
}

impl Multipart {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_owned(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, attachment: Attachment) -> Self {
        self.files.push((name.to_owned(), attachment));
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Multipart),
}

/// An outbound request relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: Vec::new(), body: RequestBody::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` if `body` cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn with_multipart(mut self, form: Multipart) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Set `Authorization: Bearer <token>`, replacing any earlier value.
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.headers.retain(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION));
        self.headers.push((AUTHORIZATION.to_owned(), format!("Bearer {token}")));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Bearer token currently attached, if any.
    pub fn bearer(&self) -> Option<&str> {
        self.header(AUTHORIZATION).and_then(|v| v.strip_prefix("Bearer "))
    }

    /// Absolute URL with a percent-encoded query string.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx response into `ApiError::Status`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` carrying the server's message (or
    /// `fallback`) when the status is not 2xx.
    pub fn error_for_status(self, fallback: &str) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status { status: self.status, message: extract_message(&self.body, fallback) })
        }
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends one request and yields the server's answer.
///
/// Any HTTP status is `Ok` at this layer; `Err` means no usable answer
/// (network failure, timeout, no browser).
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> {
        (**self).send(request)
    }
}

/// `fetch`-backed transport used by the hydrated app.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base_url: String,
    timeout: Duration,
}

impl BrowserTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self { base_url: config.api_base_url.clone(), timeout: config.request_timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let url = request.url(&self.base_url);
            let fetch = std::pin::pin!(dispatch(url, request));
            let deadline = std::pin::pin!(gloo_timers::future::sleep(self.timeout));
            match select(fetch, deadline).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, self.timeout);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn dispatch(url: String, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Delete => Request::delete(&url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(form) => builder.body(form_data(&form)?),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "hydrate")]
fn form_data(form: &Multipart) -> Result<web_sys::FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Encode(format!("{e:?}"));

    let data = web_sys::FormData::new().map_err(js_err)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value).map_err(js_err)?;
    }
    for (name, file) in &form.files {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        data.append_with_blob_and_filename(name, &blob, &file.file_name)
            .map_err(js_err)?;
    }
    Ok(data)
}
