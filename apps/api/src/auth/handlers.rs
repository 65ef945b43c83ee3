//! Authentication endpoints: signup, login, logout.
//!
//! Passwords are argon2-hashed; successful auth sets the `token` session
//! cookie the dashboard guard reads.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::token_from_cookie_header;
use crate::auth::session::{delete_session, issue_session, SESSION_TTL_DAYS};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
}

/// Session cookie: HttpOnly (script never needs the session token, unlike
/// the CSRF cookie), Lax, 30 days.
pub fn build_session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "token={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_TTL_DAYS * 24 * 60 * 60
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = "token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0".to_string();
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// POST /auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.email.trim().is_empty() || request.password.len() < 8 {
        return Err(AppError::Validation(
            "email is required and password must be at least 8 characters".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(request.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?
        .to_string();

    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(request.email.trim())
        .bind(&password_hash)
        .execute(&state.db)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::Validation("An account with this email already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    let token = issue_session(&state.db, user_id).await?;
    let cookie = build_session_cookie(&token, state.config.production);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user_id,
            email: request.email.trim().to_string(),
        }),
    ))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(request.email.trim())
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored password hash is invalid: {e}")))?;
    if Argon2::default()
        .verify_password(request.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized);
    }

    let token = issue_session(&state.db, user.id).await?;
    let cookie = build_session_cookie(&token, state.config.production);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user_id: user.id,
            email: user.email,
        }),
    ))
}

/// POST /auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
    {
        delete_session(&state.db, token).await?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie(state.config.production))],
        StatusCode::NO_CONTENT,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_shape() {
        let cookie = build_session_cookie("abc", false);
        assert!(cookie.starts_with("token=abc; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        assert!(build_session_cookie("abc", true).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
