//! Readiness scoring — blends the three per-interview scores into one 0–100
//! readiness figure. Consumed by the worker after a session completes.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::validate_score;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub technical: f64,
    pub communication: f64,
    pub confidence: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            technical: 0.5,
            communication: 0.3,
            confidence: 0.2,
        }
    }
}

/// The three scores recorded when an interview completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionScores {
    pub technical: f64,
    pub communication: f64,
    pub confidence: f64,
}

impl SessionScores {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_score("technical", self.technical)?;
        validate_score("communication", self.communication)?;
        validate_score("confidence", self.confidence)?;
        Ok(())
    }
}

/// Weighted blend, clamped to 0–100: 0.5*technical + 0.3*communication + 0.2*confidence.
pub fn compute_readiness(scores: SessionScores, weights: &ScoreWeights) -> f64 {
    (weights.technical * scores.technical
        + weights.communication * scores.communication
        + weights.confidence * scores.confidence)
        .clamp(0.0, 100.0)
}
