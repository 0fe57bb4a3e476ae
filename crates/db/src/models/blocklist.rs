//! Blocklist entry model.

use serde::Serialize;
use sqlx::FromRow;
use warden_core::types::UnixMillis;

/// A row from the `blocklist` table. The domain is stored in its
/// normalized form (lower-case, no trailing dot).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlocklistEntry {
    pub domain: String,
    pub created_at: UnixMillis,
}
