//! Operator account model.

use sqlx::FromRow;
use uuid::Uuid;
use warden_core::types::UnixMillis;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    /// Permission bitmask; 0 for a default operator.
    pub permissions: i64,
    pub created_at: UnixMillis,
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub permissions: i64,
    pub created_at: UnixMillis,
}
