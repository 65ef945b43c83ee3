//! Axum route handlers for the candidate profile API.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::CandidateProfile;
use crate::models::profile::CandidateProfileRow;
use crate::models::user::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user_id: user.id,
        profile: row.into_profile()?,
    }))
}

/// PUT /api/v1/profile
///
/// Upserts the caller's profile. The payload is validated before it touches
/// the database; the experience band is already a closed set at this point.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<ProfileResponse>, AppError> {
    profile.validate()?;

    sqlx::query(
        r#"
        INSERT INTO candidate_profiles
            (user_id, role, experience_level, technical_score,
             communication_score, confidence_score, resume_skills, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (user_id) DO UPDATE SET
            role = EXCLUDED.role,
            experience_level = EXCLUDED.experience_level,
            technical_score = EXCLUDED.technical_score,
            communication_score = EXCLUDED.communication_score,
            confidence_score = EXCLUDED.confidence_score,
            resume_skills = EXCLUDED.resume_skills,
            updated_at = now()
        "#,
    )
    .bind(user.id)
    .bind(&profile.role)
    .bind(profile.experience_level.as_str())
    .bind(profile.technical_score)
    .bind(profile.communication_score)
    .bind(profile.confidence_score)
    .bind(&profile.resume_skills)
    .execute(&state.db)
    .await?;

    Ok(Json(ProfileResponse {
        user_id: user.id,
        profile,
    }))
}
