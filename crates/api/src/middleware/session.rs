//! Session gate applied to every authenticated route.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use uuid::Uuid;
use warden_core::types::now_ms;
use warden_db::repositories::SessionRepo;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::token::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated operator, inserted into request extensions by
/// [`require_session`].
///
/// Read it in a handler with `Extension<Principal>`.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    pub name: String,
    pub permissions: i64,
}

/// Reject the request unless it carries a valid, unexpired session
/// cookie. A missing, unknown, or expired session all surface the same
/// `authentication_required` wire code so the console tears down its
/// session state on any of them.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Err(AppError::unauthenticated());
    };

    let token_hash = hash_session_token(cookie.value());

    let Some(principal) = SessionRepo::find_principal(&state.pool, &token_hash).await? else {
        return Err(AppError::unauthenticated());
    };

    if now_ms() >= principal.expires_at {
        // Expired rows are reaped on sight; the sweep only mops up
        // sessions nobody presents again.
        if let Err(e) = SessionRepo::delete(&state.pool, &token_hash).await {
            tracing::error!(error = %e, "failed to delete expired session");
        }
        return Err(AppError::unauthenticated());
    }

    req.extensions_mut().insert(Principal {
        user_id: principal.user_id,
        name: principal.name,
        permissions: principal.permissions,
    });

    Ok(next.run(req).await)
}
