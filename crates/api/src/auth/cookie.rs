//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "WARDEN_SESSION";

#[cfg(debug_assertions)]
const SAME_SITE: SameSite = SameSite::Lax;

#[cfg(not(debug_assertions))]
const SAME_SITE: SameSite = SameSite::Strict;

/// Build the HTTP-only session cookie carrying the opaque token.
///
/// `Secure` stays off: the appliance terminates TLS (when any) outside
/// this process and the console is typically reached over the LAN.
pub fn build_session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .secure(false)
        .same_site(SAME_SITE)
        .build()
}

/// Build the removal cookie used to clear the session on logout.
///
/// Must match the name and path of [`build_session_cookie`] for the
/// browser to drop the original.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
