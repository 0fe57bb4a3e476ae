//! Repository for the append-only `dns_query_log` table.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use warden_core::types::UnixMillis;

use crate::models::query_log::NewQueryLog;

/// Rows per multi-value INSERT statement, kept well under the SQLite
/// bind-variable limit (9 columns per row).
const INSERT_CHUNK: usize = 100;

/// Provides append and maintenance operations for query events.
pub struct QueryLogRepo;

impl QueryLogRepo {
    /// Append a batch of query events in one transaction.
    pub async fn batch_insert(pool: &SqlitePool, rows: &[NewQueryLog]) -> Result<(), sqlx::Error> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = pool.begin().await?;
        for chunk in rows.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO dns_query_log \
                 (ts_ms, transport, client, qname, qtype, rcode, blocked, cache_hit, dur_ms) ",
            );
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.ts_ms)
                    .push_bind(row.transport)
                    .push_bind(&row.client)
                    .push_bind(&row.qname)
                    .push_bind(row.qtype)
                    .push_bind(row.rcode)
                    .push_bind(row.blocked)
                    .push_bind(row.cache_hit)
                    .push_bind(row.dur_ms);
            });
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await
    }

    /// Number of recorded query events.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dns_query_log")
            .fetch_one(pool)
            .await
    }

    /// Delete events older than `cutoff_ms` (retention sweep).
    /// Returns the count of deleted rows.
    pub async fn prune_before(
        pool: &SqlitePool,
        cutoff_ms: UnixMillis,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dns_query_log WHERE ts_ms < ?")
            .bind(cutoff_ms)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
