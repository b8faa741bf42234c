use super::*;

#[test]
fn defaults_apply_when_unset() {
    let cfg = ClientConfig::from_values(None, None);
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn base_url_trims_whitespace_and_trailing_slashes() {
    let cfg = ClientConfig::from_values(Some("  http://localhost:8000//  "), None);
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(ClientConfig::from_values(Some("   "), None).api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn timeout_parses_seconds() {
    assert_eq!(ClientConfig::from_values(None, Some("5")).request_timeout, Duration::from_secs(5));
}

#[test]
fn invalid_or_zero_timeout_falls_back_to_default() {
    let default = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(ClientConfig::from_values(None, Some("soon")).request_timeout, default);
    assert_eq!(ClientConfig::from_values(None, Some("0")).request_timeout, default);
}
