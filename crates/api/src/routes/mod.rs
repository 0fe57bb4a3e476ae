pub mod activity;
pub mod auth;
pub mod blocklist;
pub mod config;
pub mod health;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login        login (public)
/// /auth/check        validate an existing cookie
/// /auth/logout       logout (idempotent, public by design)
///
/// /activity          unified query/error log, paginated
/// /blocklist         list (GET), block (POST), unblock (DELETE)
/// /stats/live        live counters
/// /config            get (GET), compare-and-swap update (PUT)
/// ```
///
/// Everything except `/auth/login`, `/auth/logout`, and the root-level
/// health check sits behind the session gate.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/activity", activity::router(state.clone()))
        .nest("/blocklist", blocklist::router(state.clone()))
        .nest("/stats", stats::router(state.clone()))
        .nest("/config", config::router(state))
}
