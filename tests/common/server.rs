//! actix-web mock of the portfolio backend.
//!
//! Records are kept as raw JSON per collection with Mongo-style `_id`s.
//! Saving an active CV or profile demotes the others, as the real backend
//! does. `/api/upload` accepts any multipart body and answers with a CDN URL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::Utc;
use serde_json::{Value, json};

use super::new_id;

const COLLECTIONS: &[&str] = &["cv", "education", "experience", "honors", "skills", "profile"];
const SINGLE_ACTIVE: &[&str] = &["cv", "profile"];

#[derive(Debug, Clone)]
pub struct SeenUpload {
    pub content_type: String,
    pub folder: Option<String>,
    pub bytes: usize,
}

#[derive(Default)]
pub struct MockState {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    uploads: Mutex<Vec<SeenUpload>>,
    failure: Mutex<Option<(u16, String)>>,
    delay: Mutex<Option<Duration>>,
}

impl MockState {
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections.lock().unwrap().get(collection).cloned().unwrap_or_default()
    }

    pub fn uploads(&self) -> Vec<SeenUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Every following request answers `status` with an error envelope.
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Insert a record the way another admin tab would.
    pub fn seed(&self, collection: &str, mut record: Value) -> String {
        let id = new_id();
        let now = Utc::now().to_rfc3339();
        record["_id"] = json!(id);
        record["createdAt"] = json!(now);
        record["updatedAt"] = json!(now);
        self.collections.lock().unwrap().entry(collection.to_string()).or_default().push(record);
        id
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            actix_rt::time::sleep(delay).await;
        }
    }

    fn injected_failure(&self) -> Option<HttpResponse> {
        self.failure.lock().unwrap().as_ref().map(|(status, message)| {
            let status = actix_web::http::StatusCode::from_u16(*status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(json!({ "success": false, "error": message }))
        })
    }
}

pub struct MockApi {
    pub base_url: String,
    pub state: web::Data<MockState>,
}

/// Bind an ephemeral port and serve in the background of the current
/// actix system.
pub fn start() -> MockApi {
    let state = web::Data::new(MockState::default());
    let data = state.clone();

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind mock api");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    MockApi { base_url: format!("http://{addr}"), state }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/upload", web::post().to(upload))
            .route("/{collection}", web::get().to(list))
            .route("/{collection}", web::post().to(create))
            .route("/{collection}/{id}", web::put().to(update))
            .route("/{collection}/{id}", web::delete().to(delete)),
    );
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "success": false, "error": format!("{what} not found") }))
}

fn id_of(record: &Value) -> Option<&str> {
    record.get("_id").and_then(Value::as_str)
}

fn demote_others(records: &mut [Value], collection: &str, keep_id: &str) {
    if !SINGLE_ACTIVE.contains(&collection) {
        return;
    }
    for r in records.iter_mut().filter(|r| id_of(r) != Some(keep_id)) {
        r["isActive"] = json!(false);
    }
}

async fn list(path: web::Path<String>, state: web::Data<MockState>) -> HttpResponse {
    state.pause().await;
    if let Some(resp) = state.injected_failure() {
        return resp;
    }
    let collection = path.into_inner();
    if !COLLECTIONS.contains(&collection.as_str()) {
        return not_found("Collection");
    }
    HttpResponse::Ok().json(json!({ "success": true, "data": state.records(&collection) }))
}

async fn create(
    path: web::Path<String>,
    body: web::Json<Value>,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.pause().await;
    if let Some(resp) = state.injected_failure() {
        return resp;
    }
    let collection = path.into_inner();
    if !COLLECTIONS.contains(&collection.as_str()) {
        return not_found("Collection");
    }
    let mut record = body.into_inner();
    if !record.is_object() {
        return HttpResponse::BadRequest()
            .json(json!({ "success": false, "error": "Body must be an object" }));
    }

    let id = new_id();
    let now = Utc::now().to_rfc3339();
    record["_id"] = json!(id);
    record["createdAt"] = json!(now);
    record["updatedAt"] = json!(now);

    let mut collections = state.collections.lock().unwrap();
    let records = collections.entry(collection.clone()).or_default();
    if record.get("isActive") == Some(&json!(true)) {
        demote_others(records, &collection, &id);
    }
    records.push(record.clone());

    HttpResponse::Created().json(json!({ "success": true, "data": record }))
}

async fn update(
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.pause().await;
    if let Some(resp) = state.injected_failure() {
        return resp;
    }
    let (collection, id) = path.into_inner();
    let mut collections = state.collections.lock().unwrap();
    let records = collections.entry(collection.clone()).or_default();
    let Some(idx) = records.iter().position(|r| id_of(r) == Some(id.as_str())) else {
        return not_found("Record");
    };

    let mut record = body.into_inner();
    record["_id"] = json!(id);
    record["createdAt"] = records[idx]["createdAt"].clone();
    record["updatedAt"] = json!(Utc::now().to_rfc3339());
    records[idx] = record.clone();
    if record.get("isActive") == Some(&json!(true)) {
        demote_others(records, &collection, &id);
    }

    HttpResponse::Ok().json(json!({ "success": true, "data": record }))
}

async fn delete(path: web::Path<(String, String)>, state: web::Data<MockState>) -> HttpResponse {
    state.pause().await;
    if let Some(resp) = state.injected_failure() {
        return resp;
    }
    let (collection, id) = path.into_inner();
    let mut collections = state.collections.lock().unwrap();
    let records = collections.entry(collection).or_default();
    let before = records.len();
    records.retain(|r| id_of(r) != Some(id.as_str()));
    if records.len() == before {
        return not_found("Record");
    }
    HttpResponse::Ok().json(json!({ "success": true, "message": "Deleted" }))
}

/// Pulls the `folder` text part out of a multipart body without a full
/// parser; good enough for the fixed shape reqwest produces.
fn folder_field(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let start = text.find("name=\"folder\"")?;
    let rest = &text[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let value = &rest[value_start..];
    let end = value.find("\r\n")?;
    Some(value[..end].to_string())
}

async fn upload(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    state.pause().await;
    if let Some(resp) = state.injected_failure() {
        return resp;
    }
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("multipart/form-data") {
        return HttpResponse::BadRequest()
            .json(json!({ "success": false, "error": "Expected multipart/form-data" }));
    }

    let folder = folder_field(&body);
    state.uploads.lock().unwrap().push(SeenUpload {
        content_type,
        folder: folder.clone(),
        bytes: body.len(),
    });

    let folder = folder.unwrap_or_else(|| "misc".to_string());
    let public_id = format!("{folder}/{}", new_id());
    HttpResponse::Ok().json(json!({
        "success": true,
        "url": format!("https://cdn.example.com/{public_id}"),
        "publicId": public_id,
    }))
}
