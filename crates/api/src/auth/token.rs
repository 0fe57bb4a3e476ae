//! Opaque session tokens.
//!
//! A session token is a random value handed to the operator's browser in
//! an HTTP-only cookie; only its SHA-256 hash is stored server-side, so a
//! database leak does not compromise active sessions.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a session token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes into
/// the cookie; only the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to compare an incoming cookie value against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
