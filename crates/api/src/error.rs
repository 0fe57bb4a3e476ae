use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use warden_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{error, message}` JSON
/// bodies the console consumes; `error` carries a fixed machine code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `warden-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthenticated() -> Self {
        AppError::Core(CoreError::Unauthenticated)
    }

    pub fn invalid_credentials() -> Self {
        AppError::Core(CoreError::InvalidCredentials)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "invalid_credentials",
                    "Invalid credentials.".to_string(),
                ),
                // The distinguished signal that must trigger the caller's
                // session-invalidation path.
                CoreError::Unauthenticated => (
                    StatusCode::UNAUTHORIZED,
                    "authentication_required",
                    "Authentication required.".to_string(),
                ),
                CoreError::InvalidArgument(msg) => {
                    (StatusCode::BAD_REQUEST, "invalid_argument", msg.to_string())
                }
                CoreError::VersionConflict { expected, current } => (
                    StatusCode::CONFLICT,
                    "version_conflict",
                    format!("Expected version {expected}, current version is {current}."),
                ),
                CoreError::NotFound(entity) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("{entity} not found."),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        "An internal error occurred.".to_string(),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal error occurred.".to_string(),
                )
            }

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_argument", msg.clone())
            }

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal error occurred.".to_string(),
                )
            }
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
