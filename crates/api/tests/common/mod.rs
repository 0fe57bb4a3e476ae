//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router with the same middleware stack the
//! binary uses, so tests exercise what production runs.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use warden_api::auth::password::hash_password;
use warden_api::blocklist::BlocklistService;
use warden_api::config::ServerConfig;
use warden_api::routes;
use warden_api::state::AppState;
use warden_core::types::now_ms;
use warden_db::models::user::CreateUser;
use warden_db::repositories::UserRepo;
use warden_telemetry::{Recorder, TelemetrySink};

/// Router plus the telemetry handle, for tests that inject events.
pub struct TestApp {
    pub router: Router,
    pub recorder: Recorder,
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 168,
        telemetry_queue_capacity: 256,
        retention_days: 0,
    }
}

/// Build the full application router against the given pool.
///
/// Mirrors the router construction in `main.rs` (minus the listener and
/// background sweeps).
pub async fn build_test_app(pool: SqlitePool) -> TestApp {
    let config = test_config();

    let (recorder, sink) = TelemetrySink::new(pool.clone(), config.telemetry_queue_capacity);
    tokio::spawn(sink.run());

    let blocklist = Arc::new(
        BlocklistService::load(pool.clone())
            .await
            .expect("blocklist load should succeed"),
    );

    let state = AppState {
        pool,
        config: Arc::new(config),
        recorder: recorder.clone(),
        blocklist,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes(state.clone()))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    TestApp { router, recorder }
}

/// Create a user directly in the database; returns the plaintext password.
pub async fn create_test_user(pool: &SqlitePool, name: &str) -> String {
    let password = "test_password_123!".to_string();
    let input = CreateUser {
        id: Uuid::new_v4(),
        name: name.to_string(),
        password_hash: hash_password(&password).expect("hashing should succeed"),
        permissions: 0,
        created_at: now_ms(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    password
}

/// Log in via the API and return the session cookie (`name=value`).
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "username": username, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    session_cookie(&response).expect("login must set the session cookie")
}

/// Extract the `name=value` pair of the session cookie from `Set-Cookie`.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();
    Some(pair.to_string())
}

pub async fn get(app: &TestApp, path: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, path, None, cookie).await
}

pub async fn post_json(
    app: &TestApp,
    path: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, path, Some(body), cookie).await
}

pub async fn put_json(
    app: &TestApp,
    path: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::PUT, path, Some(body), cookie).await
}

pub async fn delete_json(
    app: &TestApp,
    path: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::DELETE, path, Some(body), cookie).await
}

/// POST with no body (check, logout).
pub async fn post_empty(app: &TestApp, path: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::POST, path, None, cookie).await
}

async fn send(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
