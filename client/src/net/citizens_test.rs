use std::sync::Mutex;

use futures::executor::block_on;

use super::*;
use crate::net::http::{HttpRequest, HttpResponse, Method, RequestBody};
use crate::state::session::{MemoryStorage, SessionStore};

#[test]
fn citizen_paths_format_expected_routes() {
    assert_eq!(citizen_path("c1"), "/api/v1/citizens/c1");
    assert_eq!(citizen_licenses_path("c1"), "/api/v1/citizens/c1/licenses");
    assert_eq!(external_record_path("8001015009087"), "/api/v1/external/citizen/8001015009087");
}

#[test]
fn page_query_carries_page_and_limit() {
    assert_eq!(page_query(3, 25), [("page", "3".to_owned()), ("limit", "25".to_owned())]);
}

struct Canned {
    body: String,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Transport for Canned {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        Ok(HttpResponse::new(200, self.body.clone()))
    }
}

fn api(body: impl Into<String>) -> ApiClient<Canned, MemoryStorage> {
    ApiClient::new(
        Canned { body: body.into(), seen: Mutex::new(Vec::new()) },
        SessionStore::new(MemoryStorage::with_entries([("token", "t1")])),
    )
}

const CITIZEN: &str = r#"{
    "id": "c1", "id_number": "8001015009087", "first_name": "Sipho", "last_name": "Dlamini",
    "date_of_birth": "1980-01-01", "gender": "M", "address": "12 Long St", "phone_number": "0821234567",
    "nationality": "ZA", "created_at": "2024-01-01", "updated_at": "2024-01-01"
}"#;

#[test]
fn list_parses_paged_citizens() {
    let api = api(format!(r#"{{"data":[{CITIZEN}],"total":41}}"#));
    let page = block_on(list(&api, 2, 10)).unwrap();
    assert_eq!(page.total, 41);
    assert_eq!(page.data[0].full_name(), "Sipho Dlamini");
    let seen = api.transport().seen.lock().unwrap().clone();
    assert_eq!(seen[0].url("http://h"), "http://h/api/v1/citizens/?page=2&limit=10");
}

#[test]
fn search_sends_query_parameter() {
    let api = api(format!("[{CITIZEN}]"));
    let found = block_on(search(&api, "Dlamini")).unwrap();
    assert_eq!(found.len(), 1);
    let seen = api.transport().seen.lock().unwrap().clone();
    assert_eq!(seen[0].path, "/api/v1/citizens/search");
    assert_eq!(seen[0].query, vec![("query".to_owned(), "Dlamini".to_owned())]);
}

#[test]
fn update_puts_only_changed_fields() {
    let api = api(CITIZEN);
    let form = CitizenForm { address: Some("3 Short St".to_owned()), ..CitizenForm::default() };
    block_on(update(&api, "c1", &form)).unwrap();
    let seen = api.transport().seen.lock().unwrap().clone();
    assert_eq!(seen[0].method, Method::Put);
    assert_eq!(seen[0].path, "/api/v1/citizens/c1");
    assert_eq!(seen[0].body, RequestBody::Json(serde_json::json!({"address": "3 Short St"})));
}

#[test]
fn licenses_parses_license_list() {
    let api = api(r#"[{"id":"l1","license_number":"DL-001","citizen_id":"c1","category":"B","status":"ACTIVE"}]"#);
    let items = block_on(licenses(&api, "c1")).unwrap();
    assert_eq!(items[0].license_number, "DL-001");
    assert_eq!(items[0].expiry_date, None);
}
