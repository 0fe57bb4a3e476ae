//! Periodic maintenance tasks.

use std::time::Duration;

use tokio::task::JoinHandle;
use warden_core::types::now_ms;
use warden_db::repositories::{ErrorLogRepo, QueryLogRepo, SessionRepo};
use warden_db::DbPool;

/// How often expired sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// How often the event retention window is enforced.
const RETENTION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the expired-session sweep.
///
/// The session gate already deletes expired rows it encounters; this
/// sweep mops up sessions nobody presents again.
pub fn spawn_session_sweep(pool: DbPool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        tick.tick().await;
        loop {
            tick.tick().await;
            match SessionRepo::delete_expired(&pool, now_ms()).await {
                Ok(0) => {}
                Ok(count) => tracing::debug!(count, "swept expired sessions"),
                Err(e) => tracing::error!(error = %e, "session sweep failed"),
            }
        }
    })
}

/// Spawn the event retention sweep, deleting event rows older than
/// `retention_days`. Returns `None` when retention is disabled (`0`).
///
/// This is the only path that deletes event rows; the admin API never
/// does.
pub fn spawn_retention_sweep(pool: DbPool, retention_days: u32) -> Option<JoinHandle<()>> {
    if retention_days == 0 {
        return None;
    }

    let window_ms = i64::from(retention_days) * 24 * 60 * 60 * 1_000;
    Some(tokio::spawn(async move {
        let mut tick = tokio::time::interval(RETENTION_SWEEP_INTERVAL);
        tick.tick().await;
        loop {
            tick.tick().await;
            let cutoff = now_ms() - window_ms;

            match QueryLogRepo::prune_before(&pool, cutoff).await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "pruned old query events"),
                Err(e) => tracing::error!(error = %e, "query event retention sweep failed"),
            }
            match ErrorLogRepo::prune_before(&pool, cutoff).await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "pruned old error events"),
                Err(e) => tracing::error!(error = %e, "error event retention sweep failed"),
            }
        }
    }))
}
