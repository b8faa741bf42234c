use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use futures::executor::block_on;

use super::*;
use crate::net::http::{Method, RequestBody};
use crate::net::types::Attachment;
use crate::state::session::{MemoryStorage, Session};

// =============================================================
// Helpers
// =============================================================

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError>>;

/// Scripted server that records every request it receives.
struct MockServer {
    handler: Handler,
    requests: Mutex<Vec<HttpRequest>>,
    yield_on_refresh: bool,
}

impl MockServer {
    fn new(handler: impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + 'static) -> Self {
        Self { handler: Box::new(handler), requests: Mutex::new(Vec::new()), yield_on_refresh: false }
    }

    fn yielding_on_refresh(mut self) -> Self {
        self.yield_on_refresh = true;
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn refresh_calls(&self) -> usize {
        self.requests().iter().filter(|r| r.path == REFRESH_PATH).count()
    }
}

impl Transport for MockServer {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.yield_on_refresh && request.path == REFRESH_PATH {
            YieldNow(false).await;
        }
        (self.handler)(&request)
    }
}

/// Returns `Pending` once so concurrent futures get a chance to run.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

fn refresh_token_of(request: &HttpRequest) -> Option<String> {
    match &request.body {
        RequestBody::Json(body) => body["refresh_token"].as_str().map(str::to_owned),
        _ => None,
    }
}

/// Accepts bearer `valid`; mints `valid` for refresh token `r1`.
fn token_server(valid: &'static str) -> MockServer {
    MockServer::new(move |req| {
        if req.path == REFRESH_PATH {
            return Ok(match refresh_token_of(req).as_deref() {
                Some("r1") => HttpResponse::new(200, format!(r#"{{"access_token":"{valid}"}}"#)),
                _ => HttpResponse::new(401, r#"{"detail":"invalid refresh token"}"#),
            });
        }
        Ok(if req.bearer() == Some(valid) {
            HttpResponse::new(200, r#"{"ok":true}"#)
        } else {
            HttpResponse::new(401, r#"{"detail":"token expired"}"#)
        })
    })
}

fn store(access: Option<&str>, refresh: Option<&str>) -> SessionStore<MemoryStorage> {
    let store = SessionStore::new(MemoryStorage::default());
    store.save(&Session {
        access_token: access.map(str::to_owned),
        refresh_token: refresh.map(str::to_owned),
        user: None,
    });
    store
}

fn client(server: &Arc<MockServer>, session: SessionStore<MemoryStorage>) -> ApiClient<Arc<MockServer>, MemoryStorage> {
    ApiClient::new(Arc::clone(server), session)
}

// =============================================================
// Request policy
// =============================================================

#[test]
fn attaches_stored_token_as_bearer() {
    let server = Arc::new(token_server("t1"));
    let api = client(&server, store(Some("t1"), None));
    let resp = block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(server.requests()[0].header("Authorization"), Some("Bearer t1"));
}

#[test]
fn sends_no_authorization_without_token() {
    let server = Arc::new(MockServer::new(|_| Ok(HttpResponse::new(200, "{}"))));
    let api = client(&server, store(None, None));
    block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap();
    assert_eq!(server.requests()[0].header("Authorization"), None);
}

#[test]
fn request_method_and_body_are_untouched() {
    let server = Arc::new(token_server("t1"));
    let api = client(&server, store(Some("t1"), None));
    let request = HttpRequest::put("/api/v1/citizens/c1").with_json(&serde_json::json!({"address": "1 Main"})).unwrap();
    block_on(api.send(request.clone())).unwrap();
    let sent = &server.requests()[0];
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.body, request.body);
}

// =============================================================
// Response policy
// =============================================================

#[test]
fn other_statuses_pass_through_without_refresh() {
    for status in [400, 403, 404, 500, 503] {
        let server = Arc::new(MockServer::new(move |_| Ok(HttpResponse::new(status, "{}"))));
        let api = client(&server, store(Some("t1"), Some("r1")));
        let resp = block_on(api.send(HttpRequest::get("/api/v1/applications/"))).unwrap();
        assert_eq!(resp.status, status);
        assert_eq!(server.requests().len(), 1);
    }
}

#[test]
fn transport_errors_pass_through() {
    let server = Arc::new(MockServer::new(|_| Err(ApiError::Timeout)));
    let api = client(&server, store(Some("t1"), Some("r1")));
    let err = block_on(api.send(HttpRequest::get("/api/v1/applications/"))).unwrap_err();
    assert!(matches!(err, ApiError::Timeout));
    assert_eq!(server.refresh_calls(), 0);
}

#[test]
fn unauthorized_with_refresh_token_refreshes_once_and_retries_once() {
    let server = Arc::new(token_server("t2"));
    let api = client(&server, store(Some("t1"), Some("r1")));

    let resp = block_on(api.send(HttpRequest::get("/api/v1/citizens/c1"))).unwrap();

    assert_eq!(resp.status, 200);
    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].bearer(), Some("t1"));
    assert_eq!(requests[1].path, REFRESH_PATH);
    assert_eq!(requests[1].bearer(), None);
    assert_eq!(requests[2].path, "/api/v1/citizens/c1");
    assert_eq!(requests[2].bearer(), Some("t2"));
    assert_eq!(api.session().access_token().as_deref(), Some("t2"));
    assert_eq!(api.session().refresh_token().as_deref(), Some("r1"));
}

#[test]
fn second_unauthorized_on_retry_is_not_retried() {
    let server = Arc::new(MockServer::new(|req| {
        Ok(if req.path == REFRESH_PATH {
            HttpResponse::new(200, r#"{"access_token":"t2"}"#)
        } else {
            HttpResponse::new(401, r#"{"detail":"forbidden"}"#)
        })
    }));
    let api = client(&server, store(Some("t1"), Some("r1")));

    let resp = block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(server.requests().len(), 3);
    assert_eq!(server.refresh_calls(), 1);
}

#[test]
fn unauthorized_without_refresh_token_propagates() {
    let server = Arc::new(token_server("t2"));
    let api = client(&server, store(Some("t1"), None));

    let resp = block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(server.refresh_calls(), 0);
    assert_eq!(server.requests().len(), 1);
    assert_eq!(api.session().access_token().as_deref(), Some("t1"));
}

#[test]
fn unauthorized_surfaces_as_status_error_through_json_helpers() {
    let server = Arc::new(token_server("t2"));
    let api = client(&server, store(Some("t1"), None));
    let err = block_on(api.get_json::<serde_json::Value>("/api/v1/auth/me")).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn failed_refresh_clears_session_and_runs_hook() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hook_calls);
    let server = Arc::new(token_server("t2"));
    let api = client(&server, store(Some("t1"), Some("revoked")))
        .on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let err = block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap_err();

    match err {
        ApiError::RefreshFailed(inner) => assert_eq!(inner.status(), Some(401)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(api.session().load().is_empty());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn refresh_network_failure_also_ends_session() {
    let server = Arc::new(MockServer::new(|req| {
        if req.path == REFRESH_PATH {
            Err(ApiError::Network("connection reset".to_owned()))
        } else {
            Ok(HttpResponse::new(401, "{}"))
        }
    }));
    let api = client(&server, store(Some("t1"), Some("r1")));

    let err = block_on(api.send(HttpRequest::get("/api/v1/citizens/"))).unwrap_err();

    assert!(matches!(err, ApiError::RefreshFailed(ref inner) if matches!(**inner, ApiError::Network(_))));
    assert!(api.session().load().is_empty());
}

#[test]
fn refresh_with_malformed_body_ends_session() {
    let server = Arc::new(MockServer::new(|req| {
        Ok(if req.path == REFRESH_PATH { HttpResponse::new(200, r#"{"token":"x"}"#) } else { HttpResponse::new(401, "{}") })
    }));
    let api = client(&server, store(Some("t1"), Some("r1")));
    let err = block_on(api.send(HttpRequest::get("/x"))).unwrap_err();
    assert!(err.is_session_expired());
    assert!(api.session().load().is_empty());
}

// =============================================================
// Single-flight refresh
// =============================================================

#[test]
fn concurrent_unauthorized_requests_share_one_refresh() {
    let server = Arc::new(token_server("t2").yielding_on_refresh());
    let api = client(&server, store(Some("t1"), Some("r1")));

    let (a, b) = block_on(futures::future::join(
        api.send(HttpRequest::get("/api/v1/citizens/")),
        api.send(HttpRequest::get("/api/v1/applications/")),
    ));

    assert_eq!(a.unwrap().status, 200);
    assert_eq!(b.unwrap().status, 200);
    assert_eq!(server.refresh_calls(), 1);
    let retried: Vec<_> = server
        .requests()
        .into_iter()
        .filter(|r| r.path != REFRESH_PATH && r.bearer() == Some("t2"))
        .collect();
    assert_eq!(retried.len(), 2);
}

#[test]
fn concurrent_waiters_fail_when_shared_refresh_fails() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hook_calls);
    let server = Arc::new(token_server("t2").yielding_on_refresh());
    let api = client(&server, store(Some("t1"), Some("revoked")))
        .on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let (a, b) = block_on(futures::future::join(
        api.send(HttpRequest::get("/api/v1/citizens/")),
        api.send(HttpRequest::get("/api/v1/applications/")),
    ));

    assert!(matches!(a, Err(ApiError::RefreshFailed(_))));
    assert!(matches!(b, Err(ApiError::SessionExpired)));
    assert_eq!(server.refresh_calls(), 1);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}

// =============================================================
// Public dispatch and typed helpers
// =============================================================

#[test]
fn send_public_skips_bearer_and_refresh() {
    let server = Arc::new(token_server("t2"));
    let api = client(&server, store(Some("t1"), Some("r1")));
    let resp = block_on(api.send_public(HttpRequest::post("/api/v1/auth/login"))).unwrap();
    assert_eq!(resp.status, 401);
    assert_eq!(server.requests().len(), 1);
    assert_eq!(server.requests()[0].bearer(), None);
}

#[test]
fn get_json_with_query_encodes_parameters() {
    let server = Arc::new(MockServer::new(|_| Ok(HttpResponse::new(200, "[]"))));
    let api = client(&server, store(None, None));
    let items: Vec<serde_json::Value> =
        block_on(api.get_json_with_query("/api/v1/citizens/search", &[("query", "ndlovu".to_owned())])).unwrap();
    assert!(items.is_empty());
    assert_eq!(server.requests()[0].query, vec![("query".to_owned(), "ndlovu".to_owned())]);
}

#[test]
fn delete_maps_not_found_to_status_error() {
    let server = Arc::new(MockServer::new(|_| Ok(HttpResponse::new(404, r#"{"detail":"Citizen not found"}"#))));
    let api = client(&server, store(Some("t1"), None));
    let err = block_on(api.delete("/api/v1/citizens/missing")).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Citizen not found");
}

#[test]
fn post_multipart_sends_form_body_with_bearer() {
    let server = Arc::new(MockServer::new(|_| Ok(HttpResponse::new(201, r#"{"id":"a1"}"#))));
    let api = client(&server, store(Some("t1"), None));
    let form = Multipart::default().text("category", "B").file(
        "files",
        Attachment { file_name: "id.pdf".to_owned(), content_type: "application/pdf".to_owned(), bytes: vec![1] },
    );
    let created: serde_json::Value = block_on(api.post_multipart("/api/v1/applications/", form.clone())).unwrap();
    assert_eq!(created["id"], "a1");
    let sent = &server.requests()[0];
    assert_eq!(sent.body, RequestBody::Multipart(form));
    assert_eq!(sent.bearer(), Some("t1"));
}
