//! Read side of the unified activity log.
//!
//! Queries the `activity_log` view, a read-time UNION ALL over the query
//! and error tables. The ordering is newest-first with a deterministic
//! tie-break so that offset pagination over a fixed snapshot partitions
//! the set without gaps or duplicates: equal timestamps order errors
//! before queries (`kind ASC`), then by descending insertion id.

use sqlx::SqlitePool;

use crate::models::activity::ActivityRow;

const COLUMNS: &str = "source_id, kind, ts_ms, transport, client, qname, qtype, \
                       rcode, blocked, cache_hit, dur_ms, error_type, error_message";

/// Provides the paginated read view over both event streams.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Fetch one page of activity, newest first.
    pub async fn list(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             ORDER BY ts_ms DESC, kind ASC, source_id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of activity records (for page metadata).
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_log")
            .fetch_one(pool)
            .await
    }
}
