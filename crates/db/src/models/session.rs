//! Operator session model.
//!
//! A session row is keyed by the SHA-256 digest of its opaque token; the
//! plaintext token lives only in the operator's cookie.

use sqlx::FromRow;
use uuid::Uuid;
use warden_core::types::UnixMillis;

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: UnixMillis,
    pub expires_at: UnixMillis,
}

impl Session {
    pub fn is_expired(&self, now: UnixMillis) -> bool {
        now >= self.expires_at
    }
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: UnixMillis,
    pub expires_at: UnixMillis,
}

/// A session joined with its user, produced by the auth gate lookup.
#[derive(Debug, Clone, FromRow)]
pub struct SessionPrincipal {
    pub token_hash: String,
    pub user_id: Uuid,
    pub expires_at: UnixMillis,
    /// The user's login name.
    pub name: String,
    pub permissions: i64,
}
