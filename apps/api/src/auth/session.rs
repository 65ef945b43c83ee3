//! Session token resolution and issuance.
//!
//! The guard middleware resolves tokens through the `SessionStore` trait so
//! it can be exercised without a database; `PgSessionStore` is the real
//! implementation backed by the sessions table.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::AuthUser;

/// Session lifetime. Thirty days, matching the cookie's Max-Age.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Resolves an opaque session token to a user, or None when the token is
/// unknown or expired.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn user_from_token(&self, token: &str) -> Result<Option<AuthUser>, AppError>;
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn user_from_token(&self, token: &str) -> Result<Option<AuthUser>, AppError> {
        let user: Option<AuthUser> = sqlx::query_as(
            r#"
            SELECT u.id, u.email
            FROM users u
            JOIN sessions s ON s.user_id = u.id
            WHERE s.token = $1 AND s.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Creates a session row and returns its opaque token.
pub async fn issue_session(pool: &PgPool, user_id: Uuid) -> Result<String, AppError> {
    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(token)
}

pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
