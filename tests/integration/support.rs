//! Fake library backend and test doubles

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

use library_client::{
    config::{ApiConfig, AppConfig},
    error::{ClientError, ClientResult},
    navigation::Navigator,
    storage::{KeyValueStore, MemoryStore},
    AppState,
};

/// A request as seen by the fake backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct BackendLog {
    pub requests: Mutex<Vec<Recorded>>,
    pub bodies: Mutex<Vec<Value>>,
}

impl BackendLog {
    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request recorded")
    }

    pub fn last_body(&self) -> Value {
        self.bodies.lock().last().cloned().expect("no body recorded")
    }
}

pub struct TestBackend {
    pub base_url: String,
    pub log: Arc<BackendLog>,
}

/// Start the fake backend on an ephemeral port
pub async fn spawn_backend() -> TestBackend {
    let log = Arc::new(BackendLog::default());

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/books", get(list_books))
        .route("/api/books/search", get(list_books))
        .route("/api/books/categories", get(categories))
        .route("/api/books/:id", get(get_book).delete(delete_book))
        .route("/api/transactions/issue", post(issue_book))
        .route("/api/transactions/overdue", get(not_json_ok))
        .route("/api/users", get(list_users))
        .route("/api/fines/user/:id", get(user_fines))
        .route("/api/fines/:id/waive", post(waive_fine))
        .route("/api/reports/dashboard", get(not_json_error))
        .route("/api/reports/circulation", get(circulation))
        .route("/api/headers", get(echo_headers))
        .layer(middleware::from_fn_with_state(log.clone(), record))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        base_url: format!("http://{}/api", addr),
        log,
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn app_state(
    base_url: &str,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<RecordingNavigator>,
) -> AppState {
    let config = AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        ..Default::default()
    };
    AppState::new(config, store, navigator).unwrap()
}

/// Navigator that remembers what it was asked to do
#[derive(Default)]
pub struct RecordingNavigator {
    pub redirects: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.redirects.lock().push(location.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

/// Memory store whose writes to one key are rejected
pub struct FailingStore {
    inner: MemoryStore,
    failing_key: &'static str,
}

impl FailingStore {
    pub fn new(failing_key: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_key,
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        if key == self.failing_key {
            return Err(ClientError::Storage("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        if key == self.failing_key {
            return Err(ClientError::Storage("disk full".to_string()));
        }
        self.inner.remove(key)
    }
}

pub const ADMIN_EMAIL: &str = "admin@library.com";
pub const ADMIN_PASSWORD: &str = "Admin@123";
pub const STUDENT_EMAIL: &str = "student@library.com";
pub const STUDENT_PASSWORD: &str = "Student@123";

async fn record(State(log): State<Arc<BackendLog>>, request: Request, next: Next) -> Response {
    let recorded = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        Recorded {
            method: request.method().to_string(),
            uri: request.uri().to_string(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
        }
    };
    log.requests.lock().push(recorded);
    next.run(request).await
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (token, user) = match (email, password) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => (
            "tok_admin",
            json!({
                "user_id": 1,
                "username": "admin",
                "email": ADMIN_EMAIL,
                "full_name": "System Administrator",
                "role": "admin"
            }),
        ),
        (STUDENT_EMAIL, STUDENT_PASSWORD) => (
            "tok_student",
            json!({
                "user_id": 3,
                "username": "student",
                "email": STUDENT_EMAIL,
                "full_name": "Sample Student",
                "role": "student"
            }),
        ),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response()
        }
    };

    Json(json!({
        "message": "Login successful",
        "token": token,
        "user": user
    }))
    .into_response()
}

fn sample_book() -> Value {
    json!({
        "book_id": 1,
        "isbn": "9780441172719",
        "title": "Dune",
        "author": "Frank Herbert",
        "publisher": "Ace",
        "publication_year": 1965,
        "category": "Science Fiction",
        "total_copies": 3,
        "available_copies": 2,
        "shelf_location": "SF-01",
        "description": null,
        "cover_image": null,
        "created_at": "2024-01-01 10:00:00"
    })
}

async fn list_books() -> Json<Value> {
    Json(json!({"books": [sample_book()], "count": 1}))
}

async fn categories() -> Json<Value> {
    Json(json!({"categories": ["Fiction", "Science Fiction"]}))
}

async fn get_book(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(json!({"book": sample_book()})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"error": "Book not found"}))).into_response()
    }
}

async fn delete_book() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": ""}))).into_response()
}

async fn issue_book(State(log): State<Arc<BackendLog>>, Json(body): Json<Value>) -> Response {
    log.bodies.lock().push(body);
    (
        StatusCode::CREATED,
        Json(json!({"message": "Book issued successfully", "transaction_id": 9})),
    )
        .into_response()
}

async fn not_json_ok() -> &'static str {
    "all good"
}

async fn not_json_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn list_users() -> Json<Value> {
    Json(json!({"users": [], "count": 0}))
}

async fn user_fines(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({"fines": [], "total_pending": 0.0, "count": 0}))
}

async fn waive_fine() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({"message": "Insufficient permissions"}))).into_response()
}

async fn circulation(axum::extract::Query(params): axum::extract::Query<HashMap<String, String>>) -> Json<Value> {
    let period = format!(
        "{} to {}",
        params.get("start_date").cloned().unwrap_or_default(),
        params.get("end_date").cloned().unwrap_or_default()
    );
    Json(json!({
        "circulation": {
            "books_issued": 4,
            "books_returned": 2,
            "books_overdue": 1,
            "period": period
        }
    }))
}

async fn echo_headers(headers: axum::http::HeaderMap) -> Json<Value> {
    let values = |name: header::HeaderName| -> Vec<String> {
        headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect()
    };
    Json(json!({
        "authorization": values(header::AUTHORIZATION),
        "content_type": values(header::CONTENT_TYPE),
        "request_id": values(header::HeaderName::from_static("x-request-id")),
    }))
}
