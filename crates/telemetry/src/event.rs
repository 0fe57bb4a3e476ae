//! Ingestion-side event structs and their row conversions.

use warden_core::types::{Transport, UnixMillis};
use warden_db::models::error_log::NewErrorLog;
use warden_db::models::query_log::NewQueryLog;

/// One resolved query, recorded exactly once when resolution finishes.
#[derive(Debug, Clone)]
pub struct QueryEvent {
    pub ts_ms: UnixMillis,
    pub transport: Transport,
    pub client: Option<String>,
    pub qname: String,
    /// IANA DNS RR type.
    pub qtype: u16,
    /// DNS response code, 0-5.
    pub rcode: u16,
    pub blocked: bool,
    pub cache_hit: bool,
    /// Resolution duration in milliseconds.
    pub dur_ms: u64,
}

impl QueryEvent {
    pub(crate) fn into_row(self) -> NewQueryLog {
        NewQueryLog {
            ts_ms: self.ts_ms,
            transport: i64::from(self.transport.as_wire()),
            client: self.client,
            qname: self.qname,
            qtype: i64::from(self.qtype),
            rcode: i64::from(self.rcode),
            blocked: self.blocked,
            cache_hit: self.cache_hit,
            dur_ms: self.dur_ms as i64,
        }
    }
}

/// One failed resolution attempt.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub ts_ms: UnixMillis,
    pub transport: Transport,
    pub client: Option<String>,
    pub message: String,
    pub error_type: i64,
    /// Present when the failure happened after the question was parsed.
    pub qname: Option<String>,
    pub qtype: Option<u16>,
    pub dur_ms: u64,
}

impl ErrorEvent {
    pub(crate) fn into_row(self) -> NewErrorLog {
        NewErrorLog {
            ts_ms: self.ts_ms,
            transport: i64::from(self.transport.as_wire()),
            client: self.client,
            message: self.message,
            error_type: self.error_type,
            qname: self.qname,
            qtype: self.qtype.map(i64::from),
            dur_ms: self.dur_ms as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_event_row_conversion_preserves_fields() {
        let event = QueryEvent {
            ts_ms: 1_234,
            transport: Transport::Doh,
            client: Some("192.0.2.7".to_string()),
            qname: "example.com".to_string(),
            qtype: 28,
            rcode: 3,
            blocked: true,
            cache_hit: false,
            dur_ms: 17,
        };

        let row = event.into_row();
        assert_eq!(row.ts_ms, 1_234);
        assert_eq!(row.transport, 3);
        assert_eq!(row.qtype, 28);
        assert_eq!(row.rcode, 3);
        assert!(row.blocked);
        assert!(!row.cache_hit);
        assert_eq!(row.dur_ms, 17);
    }

    #[test]
    fn error_event_row_conversion_preserves_fields() {
        let event = ErrorEvent {
            ts_ms: 9_999,
            transport: Transport::Tcp,
            client: None,
            message: "connection reset".to_string(),
            error_type: 4,
            qname: None,
            qtype: None,
            dur_ms: 250,
        };

        let row = event.into_row();
        assert_eq!(row.ts_ms, 9_999);
        assert_eq!(row.transport, 1);
        assert_eq!(row.error_type, 4);
        assert_eq!(row.qname, None);
        assert_eq!(row.dur_ms, 250);
    }
}
