//! Handlers for the `/blocklist` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{middleware as axum_middleware, Json, Router};
use serde::Deserialize;
use warden_core::page::Page;
use warden_db::models::blocklist::BlocklistEntry;
use warden_db::repositories::BlocklistRepo;

use crate::error::AppResult;
use crate::middleware::session::require_session;
use crate::query::PaginationParams;
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/", post(add_domain))
        .route("/", delete(remove_domain))
        .layer(axum_middleware::from_fn_with_state(state, require_session))
}

/// Request body for blocklist mutations.
#[derive(Debug, Deserialize)]
pub struct DomainPayload {
    pub domain: String,
}

/// GET /api/blocklist?top=&skip=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<BlocklistEntry>>> {
    let request = params.validate()?;

    let entries =
        BlocklistRepo::list(&state.pool, request.top() as i64, request.skip() as i64).await?;
    let total = BlocklistRepo::count(&state.pool).await?;

    Ok(Json(Page::new(entries, total as usize, request)))
}

/// POST /api/blocklist
///
/// Block a domain: 201 when newly inserted, 204 when it was already
/// blocked (idempotent success).
pub async fn add_domain(
    State(state): State<AppState>,
    Json(payload): Json<DomainPayload>,
) -> AppResult<StatusCode> {
    let inserted = state.blocklist.add(&payload.domain).await?;
    if inserted {
        tracing::info!(domain = %payload.domain, "domain blocked");
        Ok(StatusCode::CREATED)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

/// DELETE /api/blocklist
///
/// Unblock a domain; idempotent.
pub async fn remove_domain(
    State(state): State<AppState>,
    Json(payload): Json<DomainPayload>,
) -> AppResult<StatusCode> {
    state.blocklist.remove(&payload.domain).await?;
    Ok(StatusCode::NO_CONTENT)
}
