#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use complia_api::config::ServerConfig;
use complia_api::router::build_app_router;
use complia_api::state::AppState;
use complia_db::models::notice_type::CreateNoticeType;
use complia_db::seed::{self, NoticeFixture};

/// Admin token configured by [`test_config`].
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults and the admin API enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_token: Some(ADMIN_TOKEN.to_string()),
    }
}

/// Build the full application router over `pool` using `config`.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Load the bundled notice fixture into `pool`.
pub async fn seed_bundled(pool: &PgPool) {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../db/fixtures/notices.json");
    let fixture = NoticeFixture::from_path(path).expect("bundled fixture should load");
    seed::apply(pool, &fixture).await.expect("seeding should succeed");
}

/// Minimal valid notice type input.
pub fn new_notice(code: &str, is_active: bool, keywords: &[&str]) -> CreateNoticeType {
    CreateNoticeType {
        code: code.to_string(),
        title: format!("{code} title"),
        summary: None,
        detailed_explanation: "Explanation".to_string(),
        why_received: None,
        common_mistakes: None,
        source_section: None,
        consequences_of_ignoring: "Consequences".to_string(),
        next_steps: "Next steps".to_string(),
        severity: None,
        verified_by: None,
        verified_at: None,
        is_active: Some(is_active),
        triggers: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

/// POST a raw, possibly malformed body as `application/json`.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get_as_admin(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(ADMIN_TOKEN))).await
}

pub async fn get_with_token(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json_as_admin(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(ADMIN_TOKEN))).await
}

pub async fn put_json_as_admin(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(ADMIN_TOKEN))).await
}

pub async fn delete_as_admin(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(ADMIN_TOKEN))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
