//! Handlers for the versioned configuration document.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{middleware as axum_middleware, Json, Router};
use serde::Deserialize;
use warden_core::types::now_ms;
use warden_db::models::config::ConfigDocument;
use warden_db::repositories::ConfigRepo;

use crate::error::AppResult;
use crate::middleware::session::require_session;
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_config))
        .route("/", put(update_config))
        .layer(axum_middleware::from_fn_with_state(state, require_session))
}

/// Request body for `PUT /api/config`.
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    /// The version the caller read; the update fails with
    /// `version_conflict` if someone else wrote in between.
    pub expected_version: i64,
    pub data: serde_json::Value,
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> AppResult<Json<ConfigDocument>> {
    let doc = ConfigRepo::get(&state.pool).await?;
    Ok(Json(doc))
}

/// PUT /api/config
///
/// Compare-and-swap update of the configuration blob.
pub async fn update_config(
    State(state): State<AppState>,
    Json(input): Json<UpdateConfigRequest>,
) -> AppResult<StatusCode> {
    let updated =
        ConfigRepo::update(&state.pool, input.expected_version, &input.data, now_ms()).await?;
    tracing::info!(version = updated.version, "configuration updated");
    Ok(StatusCode::NO_CONTENT)
}
