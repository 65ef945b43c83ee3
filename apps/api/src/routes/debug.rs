//! Debug header echo, disabled unless DEBUG_AUTH=true.
//!
//! Useful when diagnosing cookie-forwarding problems behind proxies; the
//! gate exists so the echo can never leak credentials in a normal deploy.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /api/debug/cookies
pub async fn debug_cookies_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    debug_cookies_response(state.config.debug_auth, &headers)
}

/// When disabled the route is indistinguishable from a missing one: plain
/// 404 with the exact body callers expect. When enabled, both headers are
/// echoed verbatim, null when absent.
pub fn debug_cookies_response(enabled: bool, headers: &HeaderMap) -> Response {
    if !enabled {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Debug endpoint disabled" })),
        )
            .into_response();
    }

    // Lossy so a header that exists is always reported present, even when
    // it carries non-UTF-8 bytes.
    let cookie_header = headers
        .get(header::COOKIE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    Json(json!({
        "cookieHeader": cookie_header,
        "authHeader": auth_header,
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_disabled_returns_404_with_exact_body() {
        let res = debug_cookies_response(false, &HeaderMap::new());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body, json!({ "error": "Debug endpoint disabled" }));
    }

    #[tokio::test]
    async fn test_enabled_echoes_headers_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "token=abc; csrfToken=def".parse().unwrap());
        headers.insert(header::AUTHORIZATION, "Bearer xyz".parse().unwrap());
        let res = debug_cookies_response(true, &headers);
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["cookieHeader"], "token=abc; csrfToken=def");
        assert_eq!(body["authHeader"], "Bearer xyz");
    }

    #[tokio::test]
    async fn test_enabled_echoes_non_utf8_header_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            axum::http::HeaderValue::from_bytes(b"token=\xFFabc").unwrap(),
        );
        let res = debug_cookies_response(true, &headers);
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        // Present, not null; the undecodable byte becomes U+FFFD.
        assert_eq!(body["cookieHeader"], "token=\u{FFFD}abc");
    }

    #[tokio::test]
    async fn test_enabled_with_no_headers_echoes_nulls() {
        let res = debug_cookies_response(true, &HeaderMap::new());
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["cookieHeader"], Value::Null);
        assert_eq!(body["authHeader"], Value::Null);
    }
}
