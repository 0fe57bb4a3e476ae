//! HTTP-level integration tests for the live counters endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, login};
use sqlx::SqlitePool;
use warden_core::types::{now_ms, Transport};
use warden_telemetry::{ErrorEvent, QueryEvent};

fn query_event(blocked: bool, cache_hit: bool, dur_ms: u64) -> QueryEvent {
    QueryEvent {
        ts_ms: now_ms(),
        transport: Transport::Udp,
        client: Some("192.0.2.5".to_string()),
        qname: "example.com".to_string(),
        qtype: 1,
        rcode: 0,
        blocked,
        cache_hit,
        dur_ms,
    }
}

fn error_event() -> ErrorEvent {
    ErrorEvent {
        ts_ms: now_ms(),
        transport: Transport::Tcp,
        client: None,
        message: "upstream unreachable".to_string(),
        error_type: 1,
        qname: None,
        qtype: None,
        dur_ms: 0,
    }
}

async fn authed_app(pool: &SqlitePool) -> (common::TestApp, String) {
    let password = common::create_test_user(pool, "operator").await;
    let app = common::build_test_app(pool.clone()).await;
    let cookie = login(&app, "operator", &password).await;
    (app, cookie)
}

/// A fresh process reports all-zero counters and a set `live_since`.
#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_process_reports_zeroes(pool: SqlitePool) {
    let before = now_ms();
    let (app, cookie) = authed_app(&pool).await;

    let response = get(&app, "/api/stats/live", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 0);
    assert_eq!(json["blocked"], 0);
    assert_eq!(json["cached"], 0);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["sum_duration_ms"], 0);
    assert!(json["live_since"].as_i64().unwrap() >= before);
}

/// One blocked query is visible in the snapshot immediately, without
/// waiting for any database flush.
#[sqlx::test(migrations = "../db/migrations")]
async fn blocked_query_bumps_total_and_blocked(pool: SqlitePool) {
    let (app, cookie) = authed_app(&pool).await;

    app.recorder.record_query(query_event(true, false, 9));

    let response = get(&app, "/api/stats/live", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["blocked"], 1);
    assert_eq!(json["cached"], 0);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["sum_duration_ms"], 9);
}

/// Counter update rules across a mixed workload.
#[sqlx::test(migrations = "../db/migrations")]
async fn mixed_workload_counters(pool: SqlitePool) {
    let (app, cookie) = authed_app(&pool).await;

    app.recorder.record_query(query_event(false, true, 2));
    app.recorder.record_query(query_event(true, true, 3));
    app.recorder.record_error(error_event());

    let response = get(&app, "/api/stats/live", Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["blocked"], 1);
    assert_eq!(json["cached"], 2);
    assert_eq!(json["errors"], 1);
    assert_eq!(json["sum_duration_ms"], 5);
}
