use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved from the `token` cookie by the session
/// guard and inserted into request extensions for protected handlers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}
