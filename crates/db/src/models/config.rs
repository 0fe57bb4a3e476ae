//! Versioned configuration document.

use serde::Serialize;
use warden_core::types::UnixMillis;

/// The single configuration row.
///
/// `data` is an opaque JSON document; the backend validates that it is
/// well-formed JSON and otherwise does not interpret it.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDocument {
    pub version: i64,
    pub updated_at: UnixMillis,
    pub data: serde_json::Value,
}
