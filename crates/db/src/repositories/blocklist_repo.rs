//! Repository for the `blocklist` table.
//!
//! Domains are stored in normalized form; normalization happens in the
//! service layer before any call lands here.

use sqlx::SqlitePool;
use warden_core::types::UnixMillis;

use crate::models::blocklist::BlocklistEntry;

const COLUMNS: &str = "domain, created_at";

/// Provides operations on the blocked-domain set.
pub struct BlocklistRepo;

impl BlocklistRepo {
    /// Insert a domain. Duplicate inserts succeed without changing the
    /// existing row (idempotent create); returns `true` when a new row
    /// was actually inserted.
    pub async fn insert(
        pool: &SqlitePool,
        domain: &str,
        created_at: UnixMillis,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO blocklist (domain, created_at) VALUES (?, ?)
             ON CONFLICT (domain) DO NOTHING",
        )
        .bind(domain)
        .bind(created_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a domain. Absent rows are not an error; returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &SqlitePool, domain: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocklist WHERE domain = ?")
            .bind(domain)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of entries, ordered by domain.
    pub async fn list(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlocklistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocklist
             ORDER BY domain
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, BlocklistEntry>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of blocked domains.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blocklist")
            .fetch_one(pool)
            .await
    }

    /// All domains, for rebuilding the in-memory membership index.
    pub async fn all_domains(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT domain FROM blocklist")
            .fetch_all(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn insert_is_idempotent(pool: SqlitePool) {
        assert!(BlocklistRepo::insert(&pool, "ads.example.com", 1_000)
            .await
            .unwrap());
        // Second insert succeeds but reports no new row, and the original
        // created_at is untouched.
        assert!(!BlocklistRepo::insert(&pool, "ads.example.com", 2_000)
            .await
            .unwrap());

        let entries = BlocklistRepo::list(&pool, 10, 0).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].created_at, 1_000);
    }

    #[sqlx::test]
    async fn delete_is_idempotent(pool: SqlitePool) {
        BlocklistRepo::insert(&pool, "ads.example.com", 1_000)
            .await
            .unwrap();
        assert!(BlocklistRepo::delete(&pool, "ads.example.com").await.unwrap());
        assert!(!BlocklistRepo::delete(&pool, "ads.example.com").await.unwrap());
    }

    #[sqlx::test]
    async fn list_orders_by_domain(pool: SqlitePool) {
        for domain in ["c.test", "a.test", "b.test"] {
            BlocklistRepo::insert(&pool, domain, 1_000).await.unwrap();
        }
        let entries = BlocklistRepo::list(&pool, 10, 0).await.unwrap();
        let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, ["a.test", "b.test", "c.test"]);
        assert_eq!(BlocklistRepo::count(&pool).await.unwrap(), 3);
    }
}
