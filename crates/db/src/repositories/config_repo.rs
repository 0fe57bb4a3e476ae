//! Repository for the single-row `config` table.
//!
//! The row is seeded by the initial migration with `version = 1` and the
//! `CHECK (id = 1)` constraint keeps it singular; every update is a
//! compare-and-swap on the version column.

use sqlx::{FromRow, SqlitePool};
use warden_core::error::CoreError;
use warden_core::types::UnixMillis;

use crate::models::config::ConfigDocument;

#[derive(FromRow)]
struct ConfigRow {
    version: i64,
    updated_at: i64,
    data: String,
}

/// Provides access to the versioned configuration document.
pub struct ConfigRepo;

impl ConfigRepo {
    /// Fetch the configuration document.
    pub async fn get(pool: &SqlitePool) -> Result<ConfigDocument, CoreError> {
        let row = sqlx::query_as::<_, ConfigRow>(
            "SELECT version, updated_at, data FROM config WHERE id = 1",
        )
        .fetch_one(pool)
        .await
        .map_err(|e| CoreError::Internal(format!("load config: {e}")))?;

        let data = serde_json::from_str(&row.data)
            .map_err(|e| CoreError::Internal(format!("stored config is not valid JSON: {e}")))?;

        Ok(ConfigDocument {
            version: row.version,
            updated_at: row.updated_at,
            data,
        })
    }

    /// Compare-and-swap update: replaces `data` and bumps the version by
    /// one, but only if `expected_version` still matches. A lost race
    /// fails with [`CoreError::VersionConflict`] and mutates nothing.
    pub async fn update(
        pool: &SqlitePool,
        expected_version: i64,
        data: &serde_json::Value,
        now: UnixMillis,
    ) -> Result<ConfigDocument, CoreError> {
        let result = sqlx::query(
            "UPDATE config
             SET version = version + 1, updated_at = ?, data = ?
             WHERE id = 1 AND version = ?",
        )
        .bind(now)
        .bind(data.to_string())
        .bind(expected_version)
        .execute(pool)
        .await
        .map_err(|e| CoreError::Internal(format!("update config: {e}")))?;

        if result.rows_affected() == 0 {
            let current = Self::get(pool).await?;
            return Err(CoreError::VersionConflict {
                expected: expected_version,
                current: current.version,
            });
        }

        Self::get(pool).await
    }
}
