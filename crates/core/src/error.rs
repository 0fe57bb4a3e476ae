use std::borrow::Cow;

/// Domain-level error taxonomy shared by every component.
///
/// The HTTP layer maps each variant onto a fixed machine-readable wire
/// code; see `warden-api::error`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Unknown user name or wrong password. The two cases are deliberately
    /// indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session token missing, unknown, or expired.
    #[error("Authentication required")]
    Unauthenticated,

    /// Malformed caller input (bad domain, out-of-range pagination, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// Optimistic config update lost the race.
    #[error("Version conflict: expected {expected}, current is {current}")]
    VersionConflict { expected: i64, current: i64 },

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Storage or other infrastructure failure. The message is logged
    /// server-side and sanitized on the wire.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn invalid_argument(msg: impl Into<Cow<'static, str>>) -> Self {
        CoreError::InvalidArgument(msg.into())
    }
}
