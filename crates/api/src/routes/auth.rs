//! Handlers for the `/auth` resource (login, check, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{middleware as axum_middleware, Json, Router};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use warden_core::types::now_ms;
use warden_db::models::session::CreateSession;
use warden_db::repositories::{SessionRepo, UserRepo};

use crate::auth::cookie::{build_session_cookie, removal_cookie, SESSION_COOKIE};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{generate_session_token, hash_session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::session::require_session;
use crate::state::AppState;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        // Logout reads the cookie itself: clearing an absent or stale
        // session must succeed, so it cannot sit behind the gate.
        .route("/logout", post(logout))
        .route(
            "/check",
            post(check).layer(axum_middleware::from_fn_with_state(state, require_session)),
        )
}

/// POST /api/auth/login
///
/// Verify credentials and issue a session cookie. Unknown names and wrong
/// passwords are indistinguishable on the wire, and an unknown name still
/// pays for one argon2 hash so response timing does not reveal whether
/// the account exists.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let Some(user) = UserRepo::find_by_name(&state.pool, &input.username).await? else {
        let _ = hash_password(&input.password);
        return Err(AppError::invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::invalid_credentials());
    }

    let (token, token_hash) = generate_session_token();
    let now = now_ms();
    let session = CreateSession {
        token_hash,
        user_id: user.id,
        created_at: now,
        expires_at: now + state.config.session_ttl_hours * 60 * 60 * 1_000,
    };
    SessionRepo::create(&state.pool, &session).await?;

    tracing::info!(user = %user.name, "operator logged in");

    let jar = jar.add(build_session_cookie(token));
    Ok((jar, StatusCode::NO_CONTENT).into_response())
}

/// POST /api/auth/check
///
/// Validate an existing cookie on console load. The session gate does the
/// work; reaching the handler means the session is good.
pub async fn check() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /api/auth/logout
///
/// Destroy the session and clear the cookie. Idempotent: an absent or
/// already-deleted session still returns 204.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token_hash = hash_session_token(cookie.value());
        SessionRepo::delete(&state.pool, &token_hash).await?;
    }

    let jar = jar.remove(removal_cookie());
    Ok((jar, StatusCode::NO_CONTENT).into_response())
}
