//! Handler for the live counters.

use axum::extract::State;
use axum::routing::get;
use axum::{middleware as axum_middleware, Json, Router};
use warden_telemetry::LiveCounters;

use crate::middleware::session::require_session;
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/live", get(live_stats))
        .layer(axum_middleware::from_fn_with_state(state, require_session))
}

/// GET /api/stats/live
///
/// Point-in-time snapshot of the volatile counters. Resets on restart;
/// `live_since` is the process start time.
pub async fn live_stats(State(state): State<AppState>) -> Json<LiveCounters> {
    Json(state.recorder.snapshot())
}
