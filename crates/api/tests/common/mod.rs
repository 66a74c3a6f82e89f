//! Shared harness for the API integration tests.
//!
//! Every test binary builds its app through [`build_test_app`], which goes
//! through the same `build_app_router` as `main.rs`, so tests see the full
//! middleware stack.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use jobdiary_api::config::ServerConfig;
use jobdiary_api::middleware::auth::API_KEY_HEADER;
use jobdiary_api::router::build_app_router;
use jobdiary_api::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// A `ServerConfig` with an explicit CORS origin and a fixed public base URL.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://localhost/unused".to_string(),
        api_key: TEST_API_KEY.to_string(),
        env: "test".to_string(),
        cors_origins: vec![TEST_ORIGIN.to_string()],
        public_base_url: Some("https://diary.example.com".to_string()),
        request_timeout_secs: 30,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A pool that never connects. For tests that are rejected before any query
/// runs (auth, validation, health).
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap()
}

/// GET `uri` with the test API key.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(API_KEY_HEADER, TEST_API_KEY)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET `uri` without any API key header.
pub async fn get_without_key(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET `uri` with an arbitrary `X-API-Key` value.
pub async fn get_with_key(app: Router, uri: &str, key: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(API_KEY_HEADER, key)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with the test API key.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// PATCH a JSON body with the test API key.
pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(API_KEY_HEADER, TEST_API_KEY)
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a job through the API and return its JSON.
pub async fn create_job(pool: &PgPool, user_id: &str, name: &str) -> Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/jobs",
        serde_json::json!({ "user_id": user_id, "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
