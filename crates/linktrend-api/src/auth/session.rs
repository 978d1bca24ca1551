//! Opaque session tokens and the cookie that carries them.
//!
//! Tokens are 48 alphanumeric characters; only their SHA-256 digest reaches
//! the database, so a leaked sessions table cannot be replayed.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

use crate::constants::SESSION_COOKIE;

const TOKEN_LENGTH: usize = 48;

/// Generate a fresh opaque session token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// SHA-256 digest of a token, hex-encoded, as stored in the sessions table.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extract the session token from a request's `Cookie` header, if present.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let pair = pair.trim();
            if let Some((name, token)) = pair.split_once('=') {
                if name == SESSION_COOKIE && !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}
