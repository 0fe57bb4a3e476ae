//! Resolution-error event rows.

use sqlx::FromRow;
use warden_core::types::UnixMillis;

/// A row from the append-only `dns_error_log` table.
#[derive(Debug, Clone, FromRow)]
pub struct ErrorLogRow {
    pub id: i64,
    pub ts_ms: UnixMillis,
    pub transport: i64,
    pub client: Option<String>,
    pub message: String,
    pub error_type: i64,
    /// Present when the failure happened after the question was parsed.
    pub qname: Option<String>,
    pub qtype: Option<i64>,
    pub dur_ms: i64,
}

/// Insert DTO (the `id` is assigned by the database).
#[derive(Debug, Clone)]
pub struct NewErrorLog {
    pub ts_ms: UnixMillis,
    pub transport: i64,
    pub client: Option<String>,
    pub message: String,
    pub error_type: i64,
    pub qname: Option<String>,
    pub qtype: Option<i64>,
    pub dur_ms: i64,
}
