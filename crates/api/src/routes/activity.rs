//! Handler for the unified activity listing.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{middleware as axum_middleware, Json, Router};
use serde::Serialize;
use warden_core::page::Page;
use warden_core::types::UnixMillis;
use warden_db::models::activity::ActivityRow;
use warden_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::session::require_session;
use crate::query::PaginationParams;
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_activity))
        .layer(axum_middleware::from_fn_with_state(state, require_session))
}

/// GET /api/activity?top=&skip=
///
/// One page of the merged query/error log, newest first.
pub async fn list_activity(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<ActivityRecord>>> {
    let request = params.validate()?;

    let rows = ActivityRepo::list(&state.pool, request.top() as i64, request.skip() as i64).await?;
    let total = ActivityRepo::count(&state.pool).await?;

    let records = rows
        .into_iter()
        .map(ActivityRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Page::new(records, total as usize, request)))
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// One normalized log line: either a resolved query or a resolution
/// error, discriminated by `kind`.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityRecord {
    pub timestamp: UnixMillis,
    /// Transport, 0-4 = UDP/TCP/DoT/DoH/DoQ.
    pub transport: u8,
    pub client: Option<String>,
    /// Duration in milliseconds.
    pub duration: u64,
    pub qname: Option<String>,
    pub qtype: Option<i64>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "d")]
pub enum ActivityKind {
    #[serde(rename = "query")]
    Query(ActivityQuery),
    #[serde(rename = "error")]
    Error(ActivityError),
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityQuery {
    pub source_id: i64,
    /// DNS response code, 0-5.
    pub rcode: u16,
    pub blocked: bool,
    pub cache_hit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityError {
    pub source_id: i64,
    pub error_type: i64,
    pub message: String,
}

impl TryFrom<ActivityRow> for ActivityRecord {
    type Error = AppError;

    fn try_from(row: ActivityRow) -> Result<Self, AppError> {
        let transport: u8 = row
            .transport
            .try_into()
            .map_err(|_| AppError::Internal(format!("transport out of range: {}", row.transport)))?;

        let kind = match row.kind.as_str() {
            "query" => ActivityKind::Query(ActivityQuery {
                source_id: row.source_id,
                rcode: row
                    .rcode
                    .ok_or_else(|| AppError::Internal("query row missing rcode".into()))?
                    as u16,
                blocked: row
                    .blocked
                    .ok_or_else(|| AppError::Internal("query row missing blocked".into()))?,
                cache_hit: row
                    .cache_hit
                    .ok_or_else(|| AppError::Internal("query row missing cache_hit".into()))?,
            }),
            "error" => ActivityKind::Error(ActivityError {
                source_id: row.source_id,
                error_type: row
                    .error_type
                    .ok_or_else(|| AppError::Internal("error row missing error_type".into()))?,
                message: row
                    .error_message
                    .ok_or_else(|| AppError::Internal("error row missing message".into()))?,
            }),
            other => {
                return Err(AppError::Internal(format!("unknown activity kind: {other}")));
            }
        };

        Ok(ActivityRecord {
            timestamp: row.ts_ms,
            transport,
            client: row.client,
            duration: row.dur_ms.max(0) as u64,
            qname: row.qname,
            qtype: row.qtype,
            kind,
        })
    }
}
