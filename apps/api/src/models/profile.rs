use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{CandidateProfile, ExperienceLevel};

/// One row per user. The experience band is stored as its wire spelling and
/// re-parsed into the enum on read; a value outside the four bands in the DB
/// is corruption, not user error.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfileRow {
    pub user_id: Uuid,
    pub role: String,
    pub experience_level: String,
    pub technical_score: f64,
    pub communication_score: f64,
    pub confidence_score: f64,
    pub resume_skills: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateProfileRow {
    pub fn into_profile(self) -> Result<CandidateProfile, AppError> {
        let experience_level = ExperienceLevel::parse(&self.experience_level).ok_or_else(|| {
            AppError::Internal(anyhow!(
                "stored experience_level '{}' is not a valid band",
                self.experience_level
            ))
        })?;
        Ok(CandidateProfile {
            role: self.role,
            experience_level,
            technical_score: self.technical_score,
            communication_score: self.communication_score,
            confidence_score: self.confidence_score,
            resume_skills: self.resume_skills,
        })
    }
}
