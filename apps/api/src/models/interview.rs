use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{Difficulty, InterviewQuestion, QuestionType};

/// Session lifecycle: pending → completed (scores recorded) → scored
/// (readiness filled in by the worker).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub status: String,
    pub technical_score: Option<f64>,
    pub communication_score: Option<f64>,
    pub confidence_score: Option<f64>,
    pub readiness_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewQuestionRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub position: i32,
    pub prompt: String,
    pub question_type: String,
    pub difficulty: String,
    pub focuses: Vec<String>,
    pub context: String,
    pub requires_coding: bool,
    pub languages: Vec<String>,
    #[sqlx(rename = "coding_constraints")]
    pub constraints: Vec<String>,
}

impl InterviewQuestionRow {
    pub fn into_question(self) -> Result<InterviewQuestion, AppError> {
        let question_type = QuestionType::parse(&self.question_type).ok_or_else(|| {
            AppError::Internal(anyhow!(
                "stored question_type '{}' is not in the closed set",
                self.question_type
            ))
        })?;
        let difficulty = Difficulty::parse(&self.difficulty).ok_or_else(|| {
            AppError::Internal(anyhow!(
                "stored difficulty '{}' is not in the closed set",
                self.difficulty
            ))
        })?;
        Ok(InterviewQuestion {
            id: self.id,
            prompt: self.prompt,
            question_type,
            difficulty,
            focuses: self.focuses,
            context: self.context,
            requires_coding: self.requires_coding,
            languages: self.languages,
            constraints: self.constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> InterviewQuestionRow {
        InterviewQuestionRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            position: 0,
            prompt: "Design a rate limiter.".to_string(),
            question_type: "system-design".to_string(),
            difficulty: "deep".to_string(),
            focuses: vec!["distributed systems".to_string()],
            context: "Senior-level design round.".to_string(),
            requires_coding: false,
            languages: vec![],
            constraints: vec![],
        }
    }

    #[test]
    fn test_question_row_converts() {
        let q = row().into_question().unwrap();
        assert_eq!(q.question_type, QuestionType::SystemDesign);
        assert_eq!(q.difficulty, Difficulty::Deep);
    }

    #[test]
    fn test_question_row_rejects_unknown_type() {
        let mut r = row();
        r.question_type = "puzzle".to_string();
        assert!(r.into_question().is_err());
    }
}
