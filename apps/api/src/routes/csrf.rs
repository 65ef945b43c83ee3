//! CSRF token issuance — the double-submit half the frontend reads.
//!
//! The token is returned both in the JSON body and as a script-readable
//! cookie; state-changing requests echo it back and the two copies are
//! compared. The cookie is deliberately NOT HttpOnly.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::json;

use crate::state::AppState;

pub const CSRF_COOKIE: &str = "csrfToken";
const CSRF_TOKEN_BYTES: usize = 32;
const CSRF_MAX_AGE_SECS: u32 = 86_400; // 24 hours

/// 32 bytes from the OS CSPRNG, hex-encoded: always 64 lowercase hex chars.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn build_csrf_cookie(token: &str, secure: bool) -> String {
    let mut cookie =
        format!("{CSRF_COOKIE}={token}; Path=/; Max-Age={CSRF_MAX_AGE_SECS}; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// GET /api/csrf
pub async fn csrf_handler(State(state): State<AppState>) -> impl IntoResponse {
    let token = generate_csrf_token();
    let cookie = build_csrf_cookie(&token, state.config.production);
    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "ok": true, "csrfToken": token })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_lowercase_hex_chars() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_are_not_repeated() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }

    #[test]
    fn test_cookie_value_equals_token() {
        let token = generate_csrf_token();
        let cookie = build_csrf_cookie(&token, false);
        let value = cookie
            .split(';')
            .next()
            .and_then(|kv| kv.strip_prefix("csrfToken="))
            .unwrap();
        assert_eq!(value, token);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = build_csrf_cookie("deadbeef", false);
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("SameSite=Lax"));
        // Double-submit requires the frontend to read this cookie.
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_cookie_secure_in_production() {
        assert!(build_csrf_cookie("deadbeef", true).ends_with("; Secure"));
    }
}
