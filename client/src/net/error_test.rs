use super::*;

#[test]
fn extract_message_prefers_message_key() {
    assert_eq!(extract_message(r#"{"message":"Bad input"}"#, "fallback"), "Bad input");
}

#[test]
fn extract_message_reads_detail_key() {
    assert_eq!(extract_message(r#"{"detail":"Incorrect email or password"}"#, "x"), "Incorrect email or password");
}

#[test]
fn extract_message_falls_back_for_non_json_or_blank() {
    assert_eq!(extract_message("<html>502</html>", "request failed"), "request failed");
    assert_eq!(extract_message(r#"{"message":"  "}"#, "request failed"), "request failed");
    assert_eq!(extract_message(r#"{"detail":[{"loc":"body"}]}"#, "request failed"), "request failed");
}

#[test]
fn status_is_exposed_only_for_status_errors() {
    let err = ApiError::Status { status: 404, message: "missing".to_owned() };
    assert_eq!(err.status(), Some(404));
    assert_eq!(ApiError::Timeout.status(), None);
}

#[test]
fn refresh_failure_counts_as_session_expired() {
    let err = ApiError::RefreshFailed(Box::new(ApiError::Status { status: 401, message: "revoked".to_owned() }));
    assert!(err.is_session_expired());
    assert!(ApiError::SessionExpired.is_session_expired());
    assert!(!ApiError::Timeout.is_session_expired());
}

#[test]
fn display_includes_status_and_message() {
    let err = ApiError::Status { status: 500, message: "boom".to_owned() };
    assert_eq!(err.to_string(), "request failed (500): boom");
    assert_eq!(err.user_message(), "boom");
}
