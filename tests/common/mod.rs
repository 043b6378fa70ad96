// Shared helpers for the integration suites: a fake movie store the router
// runs against, token minting, and request plumbing.
#![allow(dead_code)] // each test binary uses its own subset of these helpers

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use watchlist_api::app::app;
use watchlist_api::auth::{Claims, TokenVerifier};
use watchlist_api::config::AppConfig;
use watchlist_api::state::AppState;
use watchlist_api::store::{Movie, MovieStore, StoreError};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_ORIGIN: &str = "http://localhost:3100";

/// In-memory stand-in for the postgres store. Mirrors the store contract:
/// monotonic ids, per-user scoping, newest-first reads. Failure switches let
/// tests drive the 500 paths; call counters let them prove the store was
/// never touched.
#[derive(Default)]
pub struct FakeMovieStore {
    inner: Mutex<Inner>,
    pub fail_inserts: AtomicBool,
    pub fail_reads: AtomicBool,
    pub fail_ping: AtomicBool,
    pub insert_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
}

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: Vec<Movie>,
}

impl FakeMovieStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn row_count(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn store_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst) + self.read_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieStore for FakeMovieStore {
    async fn add_movie(&self, user_id: i32, movie_name: &str) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected insert failure".to_string()));
        }

        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(Movie { id, user_id, movie_name: movie_name.to_string() });
        Ok(())
    }

    async fn movies_for_user(&self, user_id: i32) -> Result<Vec<Movie>, StoreError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected read failure".to_string()));
        }

        let inner = self.inner.lock().unwrap();
        let mut movies: Vec<Movie> =
            inner.rows.iter().filter(|m| m.user_id == user_id).cloned().collect();
        movies.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(movies)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected ping failure".to_string()));
        }
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        database_url: "postgres://localhost/unused-in-tests".to_string(),
        port: 0,
        cors_origin: HeaderValue::from_static(TEST_ORIGIN),
    }
}

/// Router wired to the fake store, ready for `oneshot`.
pub fn test_app(store: Arc<FakeMovieStore>) -> Router {
    let state = AppState::new(store, TokenVerifier::new(TEST_SECRET));
    app(state, &test_config())
}

pub fn hour_hence() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

pub fn signed_token(id: i32, email: &str, secret: &str, exp: i64) -> String {
    let claims = Claims { id, email: email.to_string(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .expect("token encodes")
}

/// `Bearer <token>` for the given user id, signed with the test secret.
pub fn bearer(id: i32) -> String {
    let email = format!("user{}@example.com", id);
    format!("Bearer {}", signed_token(id, &email, TEST_SECRET, hour_hence()))
}

pub fn get_movies(auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/movies");
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).expect("request builds")
}

pub fn post_movie(auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/movies")
        .header("Content-Type", "application/json");
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::from(body.to_string())).expect("request builds")
}

/// Drive one request through the router and decode the JSON body
/// (Value::Null when the body is empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, body)
}

/// Like `send`, but hands back the raw response for header assertions.
pub async fn send_raw(app: Router, request: Request<Body>) -> axum::response::Response {
    app.oneshot(request).await.expect("router is infallible")
}
