//! Interview domain model — the contract between the profile store and any
//! question engine. Closed string sets from the wire become tagged enums so
//! matching is exhaustive and invalid bands are rejected at deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Years-of-experience band. Ordinal: Fresher < OneToThree < ThreeToFive < FivePlus.
/// Only the four wire spellings deserialize; anything else is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "fresher")]
    Fresher,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "fresher",
            ExperienceLevel::OneToThree => "1-3",
            ExperienceLevel::ThreeToFive => "3-5",
            ExperienceLevel::FivePlus => "5+",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fresher" => Some(ExperienceLevel::Fresher),
            "1-3" => Some(ExperienceLevel::OneToThree),
            "3-5" => Some(ExperienceLevel::ThreeToFive),
            "5+" => Some(ExperienceLevel::FivePlus),
            _ => None,
        }
    }

    /// Ordinal rank, 0 (fresher) through 3 (5+). Difficulty planning consumes this.
    pub fn rank(&self) -> u8 {
        match self {
            ExperienceLevel::Fresher => 0,
            ExperienceLevel::OneToThree => 1,
            ExperienceLevel::ThreeToFive => 2,
            ExperienceLevel::FivePlus => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Technical,
    Behavioral,
    Coding,
    SystemDesign,
    Managerial,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
            QuestionType::Coding => "coding",
            QuestionType::SystemDesign => "system-design",
            QuestionType::Managerial => "managerial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "technical" => Some(QuestionType::Technical),
            "behavioral" => Some(QuestionType::Behavioral),
            "coding" => Some(QuestionType::Coding),
            "system-design" => Some(QuestionType::SystemDesign),
            "managerial" => Some(QuestionType::Managerial),
            _ => None,
        }
    }
}

/// Question depth. Ordinal: Intro < Core < Deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Intro,
    Core,
    Deep,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Intro => "intro",
            Difficulty::Core => "core",
            Difficulty::Deep => "deep",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intro" => Some(Difficulty::Intro),
            "core" => Some(Difficulty::Core),
            "deep" => Some(Difficulty::Deep),
            _ => None,
        }
    }
}

/// What a question engine consumes: role, experience band, the three
/// 0–100 scores, and resume-derived skills in extraction order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub role: String,
    pub experience_level: ExperienceLevel,
    pub technical_score: f64,
    pub communication_score: f64,
    pub confidence_score: f64,
    pub resume_skills: Vec<String>,
}

/// Scores are 0–100 inclusive. The source left the range open; 0–100 is the
/// recorded decision (see DESIGN.md) and is enforced here, NaN included.
pub fn validate_score(name: &str, value: f64) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "{name} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

impl CandidateProfile {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.role.trim().is_empty() {
            return Err(AppError::Validation("role cannot be empty".to_string()));
        }
        validate_score("technical_score", self.technical_score)?;
        validate_score("communication_score", self.communication_score)?;
        validate_score("confidence_score", self.confidence_score)?;
        Ok(())
    }
}

/// A single interview question. Constructed once, immutable thereafter.
/// `languages` and `constraints` are only meaningful when `requires_coding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: Uuid,
    pub prompt: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub focuses: Vec<String>,
    pub context: String,
    #[serde(default)]
    pub requires_coding: bool,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl InterviewQuestion {
    /// Producer contract: every question engine must satisfy this before a
    /// question leaves the engine. Coding questions must name at least one
    /// language.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.prompt.trim().is_empty() {
            return Err(AppError::Validation(
                "question prompt cannot be empty".to_string(),
            ));
        }
        if self.requires_coding && self.languages.is_empty() {
            return Err(AppError::Validation(format!(
                "coding question {} must list at least one language",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            role: "Backend Engineer".to_string(),
            experience_level: ExperienceLevel::OneToThree,
            technical_score: 70.0,
            communication_score: 60.0,
            confidence_score: 55.0,
            resume_skills: vec!["rust".to_string(), "postgres".to_string()],
        }
    }

    fn question() -> InterviewQuestion {
        InterviewQuestion {
            id: Uuid::new_v4(),
            prompt: "Walk me through a recent project.".to_string(),
            question_type: QuestionType::Behavioral,
            difficulty: Difficulty::Core,
            focuses: vec!["ownership".to_string()],
            context: "Mid-interview depth check.".to_string(),
            requires_coding: false,
            languages: vec![],
            constraints: vec![],
        }
    }

    #[test]
    fn test_experience_level_deserializes_all_four_bands() {
        for (raw, expected) in [
            ("\"fresher\"", ExperienceLevel::Fresher),
            ("\"1-3\"", ExperienceLevel::OneToThree),
            ("\"3-5\"", ExperienceLevel::ThreeToFive),
            ("\"5+\"", ExperienceLevel::FivePlus),
        ] {
            let parsed: ExperienceLevel = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_experience_level_rejects_other_values() {
        assert!(serde_json::from_str::<ExperienceLevel>("\"10+\"").is_err());
        assert!(serde_json::from_str::<ExperienceLevel>("\"senior\"").is_err());
        assert!(serde_json::from_str::<ExperienceLevel>("\"\"").is_err());
    }

    #[test]
    fn test_experience_level_is_ordinal() {
        assert!(ExperienceLevel::Fresher < ExperienceLevel::OneToThree);
        assert!(ExperienceLevel::OneToThree < ExperienceLevel::ThreeToFive);
        assert!(ExperienceLevel::ThreeToFive < ExperienceLevel::FivePlus);
    }

    #[test]
    fn test_question_type_kebab_case_wire_format() {
        assert_eq!(
            serde_json::to_string(&QuestionType::SystemDesign).unwrap(),
            "\"system-design\""
        );
        let parsed: QuestionType = serde_json::from_str("\"system-design\"").unwrap();
        assert_eq!(parsed, QuestionType::SystemDesign);
        assert!(serde_json::from_str::<QuestionType>("\"trivia\"").is_err());
    }

    #[test]
    fn test_difficulty_is_ordinal() {
        assert!(Difficulty::Intro < Difficulty::Core);
        assert!(Difficulty::Core < Difficulty::Deep);
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(profile().validate().is_ok());
    }

    #[test]
    fn test_empty_role_fails() {
        let mut p = profile();
        p.role = "   ".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_score_out_of_range_fails() {
        let mut p = profile();
        p.technical_score = 101.0;
        assert!(p.validate().is_err());
        p.technical_score = -0.5;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_nan_score_fails() {
        let mut p = profile();
        p.confidence_score = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_score_bounds_inclusive() {
        let mut p = profile();
        p.technical_score = 0.0;
        p.communication_score = 100.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_coding_question_without_languages_fails() {
        let mut q = question();
        q.question_type = QuestionType::Coding;
        q.requires_coding = true;
        q.languages = vec![];
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_coding_question_with_languages_passes() {
        let mut q = question();
        q.question_type = QuestionType::Coding;
        q.requires_coding = true;
        q.languages = vec!["rust".to_string()];
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_empty_prompt_fails() {
        let mut q = question();
        q.prompt = "".to_string();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_optional_coding_fields_default_on_deserialize() {
        let raw = r#"{
            "id": "6a3bbcd8-7c2e-4fd9-9f40-1f2f3b9a0001",
            "prompt": "Explain indexing trade-offs.",
            "type": "technical",
            "difficulty": "core",
            "focuses": ["postgres"],
            "context": "Storage depth check."
        }"#;
        let q: InterviewQuestion = serde_json::from_str(raw).unwrap();
        assert!(!q.requires_coding);
        assert!(q.languages.is_empty());
        assert!(q.constraints.is_empty());
        assert!(q.validate().is_ok());
    }
}
