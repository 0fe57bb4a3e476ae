//! HTTP-level integration tests for the versioned config document.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, login, put_json};
use sqlx::SqlitePool;

async fn authed_app(pool: &SqlitePool) -> (common::TestApp, String) {
    let password = common::create_test_user(pool, "operator").await;
    let app = common::build_test_app(pool.clone()).await;
    let cookie = login(&app, "operator", &password).await;
    (app, cookie)
}

/// First boot: version 1 with an empty object.
#[sqlx::test(migrations = "../db/migrations")]
async fn initial_config_is_version_one(pool: SqlitePool) {
    let (app, cookie) = authed_app(&pool).await;

    let response = get(&app, "/api/config", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 1);
    assert_eq!(json["data"], serde_json::json!({}));
}

/// A matching expected_version updates the blob and bumps the version.
#[sqlx::test(migrations = "../db/migrations")]
async fn cas_update_succeeds_and_bumps_version(pool: SqlitePool) {
    let (app, cookie) = authed_app(&pool).await;

    let response = put_json(
        &app,
        "/api/config",
        serde_json::json!({
            "expected_version": 1,
            "data": { "upstreams": ["9.9.9.9", "149.112.112.112"] }
        }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/config", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["data"]["upstreams"][0], "9.9.9.9");
    assert!(json["updated_at"].as_i64().unwrap() > 0);
}

/// A stale expected_version conflicts and mutates nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn stale_version_is_409_and_leaves_data_untouched(pool: SqlitePool) {
    let (app, cookie) = authed_app(&pool).await;

    let response = put_json(
        &app,
        "/api/config",
        serde_json::json!({ "expected_version": 1, "data": { "a": 1 } }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Replay the same expected_version: someone else already wrote v2.
    let response = put_json(
        &app,
        "/api/config",
        serde_json::json!({ "expected_version": 1, "data": { "a": 2 } }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "version_conflict");

    let response = get(&app, "/api/config", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["data"]["a"], 1);
}
