//! Resolved-query event rows.

use sqlx::FromRow;
use warden_core::types::UnixMillis;

/// A row from the append-only `dns_query_log` table.
#[derive(Debug, Clone, FromRow)]
pub struct QueryLogRow {
    pub id: i64,
    pub ts_ms: UnixMillis,
    /// Wire transport, 0-4 = UDP/TCP/DoT/DoH/DoQ.
    pub transport: i64,
    pub client: Option<String>,
    pub qname: String,
    /// IANA DNS RR type.
    pub qtype: i64,
    /// DNS response code, 0-5.
    pub rcode: i64,
    pub blocked: bool,
    pub cache_hit: bool,
    /// Resolution duration in milliseconds.
    pub dur_ms: i64,
}

/// Insert DTO (the `id` is assigned by the database).
#[derive(Debug, Clone)]
pub struct NewQueryLog {
    pub ts_ms: UnixMillis,
    pub transport: i64,
    pub client: Option<String>,
    pub qname: String,
    pub qtype: i64,
    pub rcode: i64,
    pub blocked: bool,
    pub cache_hit: bool,
    pub dur_ms: i64,
}
