//! In-process mock of the gallery backend for tests.
//!
//! Serves `/api/users/login`, `/api/works`, `/api/works/{id}` and
//! `/api/categories` on an ephemeral port, with canned responses and a
//! record of what each request carried.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    body: Option<Value>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    fn to_response(&self) -> Response {
        let status = StatusCode::from_u16(self.status).expect("valid mock status");
        match self.body {
            Some(ref body) => (status, Json(body.clone())).into_response(),
            None => status.into_response(),
        }
    }
}

/// One multipart field as received by the mock
#[derive(Debug, Clone)]
pub struct UploadField {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadField {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

struct MockState {
    hits: AtomicUsize,
    login: Mutex<MockResponse>,
    works: Mutex<MockResponse>,
    categories: Mutex<MockResponse>,
    create: Mutex<MockResponse>,
    delete: Mutex<MockResponse>,
    last_login_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
    last_upload: Mutex<Option<HashMap<String, UploadField>>>,
    deleted_ids: Mutex<Vec<i64>>,
}

impl MockState {
    fn record(&self, headers: &HeaderMap) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.last_authorization.lock().unwrap() = auth;
    }
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            hits: AtomicUsize::new(0),
            login: Mutex::new(MockResponse::json(200, json!({"userId": 1, "token": "token"}))),
            works: Mutex::new(MockResponse::json(200, json!([]))),
            categories: Mutex::new(MockResponse::json(200, json!([]))),
            create: Mutex::new(MockResponse::empty(500)),
            delete: Mutex::new(MockResponse::empty(204)),
            last_login_body: Mutex::new(None),
            last_authorization: Mutex::new(None),
            last_upload: Mutex::new(None),
            deleted_ids: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/users/login", post(login))
            .route("/api/works", get(list_works).post(create_work))
            .route("/api/works/{id}", delete(delete_work))
            .route("/api/categories", get(list_categories))
            .fallback(not_found)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Number of requests that reached the backend, including unknown routes
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn respond_login(&self, response: MockResponse) {
        *self.state.login.lock().unwrap() = response;
    }

    pub fn respond_works(&self, response: MockResponse) {
        *self.state.works.lock().unwrap() = response;
    }

    pub fn respond_categories(&self, response: MockResponse) {
        *self.state.categories.lock().unwrap() = response;
    }

    pub fn respond_create(&self, response: MockResponse) {
        *self.state.create.lock().unwrap() = response;
    }

    pub fn respond_delete(&self, response: MockResponse) {
        *self.state.delete.lock().unwrap() = response;
    }

    pub fn last_login_body(&self) -> Option<Value> {
        self.state.last_login_body.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    pub fn last_upload(&self) -> Option<HashMap<String, UploadField>> {
        self.state.last_upload.lock().unwrap().clone()
    }

    pub fn deleted_ids(&self) -> Vec<i64> {
        self.state.deleted_ids.lock().unwrap().clone()
    }
}

async fn login(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    state.record(&headers);
    *state.last_login_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    state.login.lock().unwrap().to_response()
}

async fn not_found(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    StatusCode::NOT_FOUND.into_response()
}

async fn list_works(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    state.works.lock().unwrap().to_response()
}

async fn list_categories(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record(&headers);
    state.categories.lock().unwrap().to_response()
}

async fn create_work(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.record(&headers);
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.expect("multipart bytes").to_vec();
        fields.insert(
            name,
            UploadField {
                file_name,
                content_type,
                data,
            },
        );
    }
    *state.last_upload.lock().unwrap() = Some(fields);
    state.create.lock().unwrap().to_response()
}

async fn delete_work(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    state.record(&headers);
    state.deleted_ids.lock().unwrap().push(id);
    state.delete.lock().unwrap().to_response()
}
