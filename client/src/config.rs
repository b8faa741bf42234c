//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so values are baked in with
//! `option_env!` when the crate is compiled:
//!
//! - `LICENSING_API_URL`: REST API base URL (default
//!   `https://ampro-licence.onrender.com`)
//! - `LICENSING_API_TIMEOUT_SECS`: per-request timeout (default 30)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://ampro-licence.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Configuration baked into this build.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("LICENSING_API_URL"), option_env!("LICENSING_API_TIMEOUT_SECS"))
    }

    fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        Self {
            api_base_url: parse_base_url(base_url),
            request_timeout: Duration::from_secs(parse_timeout_secs(timeout_secs)),
        }
    }
}

fn parse_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE_URL.to_owned(),
    }
}

fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}
