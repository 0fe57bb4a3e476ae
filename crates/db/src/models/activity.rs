//! Unified activity rows read from the `activity_log` view.

use sqlx::FromRow;
use warden_core::types::UnixMillis;

/// One row of the read-time union over query and error events.
///
/// `kind` is `"query"` or `"error"`; the trailing option fields are
/// populated for one kind and NULL for the other.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    /// Insertion id within the source table; tie-break component.
    pub source_id: i64,
    pub kind: String,
    pub ts_ms: UnixMillis,
    pub transport: i64,
    pub client: Option<String>,
    pub qname: Option<String>,
    pub qtype: Option<i64>,
    pub dur_ms: i64,

    pub rcode: Option<i64>,
    pub blocked: Option<bool>,
    pub cache_hit: Option<bool>,

    pub error_type: Option<i64>,
    pub error_message: Option<String>,
}
