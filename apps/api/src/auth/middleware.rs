//! Dashboard session guard.
//!
//! Reads the `token` cookie, resolves it through the `SessionStore`, and
//! redirects to the login route on any failure — no protected handler runs
//! without a resolved user. Auth failure here is a redirect, never an error
//! payload.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::auth::session::SessionStore;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const SESSION_COOKIE: &str = "token";

/// Pulls the session token out of a raw Cookie header.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .find_map(|c| c.trim().strip_prefix("token="))
        .filter(|t| !t.is_empty())
}

pub async fn require_session(
    State(sessions): State<Arc<dyn SessionStore>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header);

    let Some(token) = token else {
        return Redirect::to(LOGIN_ROUTE).into_response();
    };

    match sessions.user_from_token(token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => Redirect::to(LOGIN_ROUTE).into_response(),
        Err(e) => {
            error!("Session lookup failed: {e}");
            Redirect::to(LOGIN_ROUTE).into_response()
        }
    }
}
