//! In-process stand-in for the catalogue backend

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::{Path, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use bookshelf_core::{BookshelfClient, ClientConfig};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        self.header("cookie")
            .and_then(|c| bookshelf_core::gateway::find_cookie(&c, name).map(Cow::into_owned))
    }
}

#[derive(Clone, Default)]
pub struct Backend {
    log: Arc<Mutex<Vec<Recorded>>>,
    tokens_issued: Arc<AtomicUsize>,
    csrf_broken: Arc<AtomicBool>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// Requests other than token issuance
    pub fn api_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path != "/api/csrf/")
            .collect()
    }

    pub fn csrf_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path == "/api/csrf/")
            .count()
    }

    pub fn break_csrf_endpoint(&self) {
        self.csrf_broken.store(true, Ordering::SeqCst);
    }
}

pub struct FakeBackend {
    pub base_url: String,
    pub backend: Backend,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let backend = Backend::default();
        let app = router(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            backend,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).unwrap()
    }

    pub fn client(&self) -> BookshelfClient {
        BookshelfClient::new(self.config()).unwrap()
    }
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/api/csrf/", get(issue_csrf))
        .route("/api/login/", post(login))
        .route("/api/logout/", post(logout))
        .route("/api/me/", get(me))
        .route("/api/books/", get(list_books).post(create_book))
        .route(
            "/api/books/:id/",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/books/:id/reviews/", get(list_reviews))
        .route("/api/authors/", get(list_authors).post(create_author))
        .route(
            "/api/authors/:id/",
            put(update_author).delete(delete_author),
        )
        .route("/api/reviews/", post(create_review))
        .route(
            "/api/reviews/:id/",
            get(get_review).put(update_review).delete(delete_review),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

/// Log every request, then enforce CSRF on unsafe methods
async fn record(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let recorded = Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers.clone(),
        body: bytes.to_vec(),
    };
    backend.log.lock().unwrap().push(recorded.clone());

    let unsafe_method = !matches!(recorded.method.as_str(), "GET" | "HEAD" | "OPTIONS");
    if unsafe_method {
        let sent = recorded.header("x-csrftoken");
        let cookie = recorded.cookie("csrftoken");
        if sent.is_none() || sent != cookie {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"detail": "CSRF Failed: CSRF token missing or incorrect."})),
            )
                .into_response();
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn issue_csrf(State(backend): State<Backend>) -> Response {
    if backend.csrf_broken.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let n = backend.tokens_issued.fetch_add(1, Ordering::SeqCst) + 1;
    (
        [(header::SET_COOKIE, format!("csrftoken=token{}; Path=/", n))],
        Json(json!({"detail": "CSRF cookie set"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["required"]})),
        )
            .into_response();
    }
    if username != "admin" || password != "secret" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Invalid username or password."]})),
        )
            .into_response();
    }
    (
        [(header::SET_COOKIE, "sessionid=sess-admin; Path=/; HttpOnly")],
        Json(json!({"id": 1, "username": "admin", "is_admin": true})),
    )
        .into_response()
}

async fn logout() -> Response {
    (
        [(
            header::SET_COOKIE,
            "sessionid=; expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/",
        )],
        Json(json!({"detail": "Logged out"})),
    )
        .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match bookshelf_core::gateway::find_cookie(cookie, "sessionid").as_deref() {
        Some("sess-admin") => Json(json!({"id": 1, "username": "admin", "is_admin": true})).into_response(),
        Some("sess-reader") => Json(json!({"id": 2, "username": "reader", "is_admin": false})).into_response(),
        // Rotates the session on every lookup
        Some("sess-visitor") => (
            [(header::SET_COOKIE, "sessionid=visitor-rotated; Path=/; HttpOnly")],
            Json(json!({"id": 3, "username": "visitor", "is_admin": false})),
        )
            .into_response(),
        _ => (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response(),
    }
}

fn book_row(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Book {}", id),
        "author_name": "Frank Herbert",
        "average_rating": "4.50",
        "review_count": 2,
        "published_at": "1965-08-01"
    })
}

async fn list_books() -> Json<Value> {
    Json(json!({
        "count": 12,
        "next": "http://testserver/api/books/?page=2",
        "previous": null,
        "results": (1..=10).map(book_row).collect::<Vec<_>>()
    }))
}

async fn get_book(Path(id): Path<u64>) -> Response {
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    Json(json!({
        "id": id,
        "title": format!("Book {}", id),
        "author": {"id": 4, "name": "Frank Herbert"},
        "published_at": "1965-08-01",
        "average_rating": 4.5,
        "review_count": 2,
        "reviews": [
            {"review_id": 10, "user_id": 1, "user_name": "admin", "content": "Great", "rating": 5, "created_at": "2024-05-01T09:30:00Z"},
            {"review_id": 11, "user_id": 2, "user_name": "reader", "content": "Good", "rating": 4, "created_at": "2024-05-02T09:30:00Z"}
        ]
    }))
    .into_response()
}

async fn create_book(Json(body): Json<Value>) -> Response {
    if body["title"] == "Dune" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"title": ["book with this title already exists."]})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({"id": 99, "title": body["title"], "author": body["author"]}))).into_response()
}

async fn update_book(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({"id": id, "updated": true}))
}

async fn delete_book() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_reviews(Path(id): Path<u64>) -> Json<Value> {
    Json(json!([
        {"review_id": 10, "book_id": id, "user_id": 1, "user_name": "admin", "content": "Great", "rating": 5}
    ]))
}

async fn list_authors() -> Json<Value> {
    Json(json!([{"id": 4, "name": "Frank Herbert"}, {"id": 5, "name": "Ursula K. Le Guin"}]))
}

async fn create_author(Json(body): Json<Value>) -> Response {
    (StatusCode::CREATED, Json(json!({"id": 6, "name": body["name"]}))).into_response()
}

async fn update_author(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({"id": id, "updated": true}))
}

/// Answers with a JSON body instead of 204
async fn delete_author(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({"deleted": id}))
}

async fn create_review(Json(body): Json<Value>) -> Response {
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_review(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({"review_id": id, "user_id": 2, "user_name": "reader", "content": "Good", "rating": 4}))
}

async fn update_review(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

/// 200 with an empty body
async fn delete_review() -> StatusCode {
    StatusCode::OK
}
