//! Question engines — pluggable, trait-based producers of interview question
//! sets from a candidate profile.
//!
//! Default: `BankQuestionSource` (template bank, deterministic, fully
//! testable). Alternative: `LlmQuestionSource` (Claude-backed), swapped at
//! startup via ENABLE_LLM_QUESTIONS. `AppState` holds an
//! `Arc<dyn QuestionSource>`.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{
    CandidateProfile, Difficulty, InterviewQuestion, QuestionType,
};
use crate::interview::prompts::{QUESTION_GEN_PROMPT, QUESTION_GEN_SYSTEM};
use crate::interview::selection::{focus_for, plan_difficulties, plan_types};
use crate::llm_client::LlmClient;

/// Hard cap on questions per generated set.
pub const MAX_QUESTIONS: usize = 20;

/// The question engine trait. Implement this to swap backends without
/// touching the endpoint, handler, or caller code.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate(
        &self,
        profile: &CandidateProfile,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// BankQuestionSource — default deterministic engine
// ────────────────────────────────────────────────────────────────────────────

/// Template-bank engine. No LLM call; prompts are built from a fixed grid of
/// (type, difficulty) templates with the role and a resume-derived focus
/// substituted in.
pub struct BankQuestionSource;

#[async_trait]
impl QuestionSource for BankQuestionSource {
    async fn generate(
        &self,
        profile: &CandidateProfile,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        profile.validate()?;
        if count == 0 || count > MAX_QUESTIONS {
            return Err(AppError::Validation(format!(
                "question count must be between 1 and {MAX_QUESTIONS}"
            )));
        }

        let difficulties = plan_difficulties(profile, count);
        let types = plan_types(profile, count);

        let questions: Vec<InterviewQuestion> = types
            .into_iter()
            .zip(difficulties)
            .enumerate()
            .map(|(i, (question_type, difficulty))| {
                build_question(profile, question_type, difficulty, &focus_for(profile, i))
            })
            .collect();

        for q in &questions {
            q.validate()?;
        }
        Ok(questions)
    }
}

/// Languages recognizable in a resume skill list. Used to pick the coding
/// languages a candidate can actually be asked to write.
const KNOWN_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "go",
    "rust",
    "ruby",
    "kotlin",
    "swift",
    "php",
];

const DEFAULT_LANGUAGES: &[&str] = &["python", "javascript"];

/// Languages for coding questions: known languages from the resume in
/// extraction order, or a fixed default when the resume names none.
pub fn languages_for(profile: &CandidateProfile) -> Vec<String> {
    let from_resume: Vec<String> = profile
        .resume_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| KNOWN_LANGUAGES.contains(&s.as_str()))
        .collect();
    if from_resume.is_empty() {
        DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
    } else {
        from_resume
    }
}

fn coding_constraints(difficulty: Difficulty) -> Vec<String> {
    match difficulty {
        Difficulty::Intro => vec![
            "20 minutes".to_string(),
            "single function, no edge-case handling required".to_string(),
        ],
        Difficulty::Core => vec![
            "35 minutes".to_string(),
            "O(n log n) or better".to_string(),
        ],
        Difficulty::Deep => vec![
            "50 minutes".to_string(),
            "production-quality error handling and tests".to_string(),
        ],
    }
}

/// Prompt and context templates per (type, difficulty). `{role}` and
/// `{focus}` are substituted at build time.
fn template(question_type: QuestionType, difficulty: Difficulty) -> (&'static str, &'static str) {
    use Difficulty::*;
    use QuestionType::*;
    match (question_type, difficulty) {
        (Technical, Intro) => (
            "Explain the core ideas behind {focus} and where you have applied it as a {role}.",
            "Warm-up to gauge baseline familiarity with the candidate's own stack.",
        ),
        (Technical, Core) => (
            "What trade-offs have you weighed when using {focus} in production, and how did you decide?",
            "Mid-interview depth check on a skill the resume claims.",
        ),
        (Technical, Deep) => (
            "Describe a failure mode of {focus} you have debugged end to end. What was the root cause?",
            "Probes real operational depth rather than textbook knowledge.",
        ),
        (Behavioral, Intro) => (
            "Tell me about a recent piece of work as a {role} you are proud of.",
            "Open-ended warm-up; listen for ownership and specificity.",
        ),
        (Behavioral, Core) => (
            "Describe a time you disagreed with a teammate about {focus}. How was it resolved?",
            "Conflict-handling probe anchored to a concrete skill area.",
        ),
        (Behavioral, Deep) => (
            "Tell me about a project that failed despite your best effort. What would you change?",
            "Looks for honest retrospection and lessons actually applied.",
        ),
        (Coding, Intro) => (
            "Write a function that deduplicates a list while preserving first-occurrence order.",
            "Screens basic data-structure fluency under light time pressure.",
        ),
        (Coding, Core) => (
            "Implement a rate limiter supporting a per-key sliding window; discuss your approach to {focus} along the way.",
            "Tests algorithm choice and incremental refinement.",
        ),
        (Coding, Deep) => (
            "Build an LRU cache with O(1) get and put, then extend it with expiry. Narrate the invariants.",
            "Full coding round; expects invariant-driven reasoning out loud.",
        ),
        (SystemDesign, Intro) => (
            "Sketch the components of a URL shortener and how a request flows through them.",
            "Entry-level design vocabulary check.",
        ),
        (SystemDesign, Core) => (
            "Design a notification service for a product a {role} would own. Where does {focus} fit?",
            "Mid-level design round grounded in the candidate's domain.",
        ),
        (SystemDesign, Deep) => (
            "Design a multi-region deployment for a stateful service. Walk through failover and data consistency.",
            "Senior design round; expects explicit trade-off analysis.",
        ),
        (Managerial, Intro) => (
            "How do you onboard a new teammate onto a codebase that uses {focus}?",
            "Light leadership probe for candidates moving beyond IC scope.",
        ),
        (Managerial, Core) => (
            "A project is slipping and a stakeholder wants scope added. Walk me through your next week as a {role}.",
            "Prioritization and stakeholder-management scenario.",
        ),
        (Managerial, Deep) => (
            "Tell me how you have handled an underperforming senior engineer on your team.",
            "Hard people-management scenario; expects concrete past behavior.",
        ),
    }
}

/// Builds one immutable question from the bank. Coding questions always
/// carry languages and constraints; other types never do.
pub fn build_question(
    profile: &CandidateProfile,
    question_type: QuestionType,
    difficulty: Difficulty,
    focus: &str,
) -> InterviewQuestion {
    let (prompt_tpl, context) = template(question_type, difficulty);
    let prompt = prompt_tpl
        .replace("{role}", profile.role.trim())
        .replace("{focus}", focus);

    let requires_coding = question_type == QuestionType::Coding;
    let (languages, constraints) = if requires_coding {
        (languages_for(profile), coding_constraints(difficulty))
    } else {
        (vec![], vec![])
    };

    InterviewQuestion {
        id: Uuid::new_v4(),
        prompt,
        question_type,
        difficulty,
        focuses: vec![focus.to_string()],
        context: context.to_string(),
        requires_coding,
        languages,
        constraints,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmQuestionSource — Claude-backed engine
// ────────────────────────────────────────────────────────────────────────────

/// What the LLM returns per question; ids are assigned server-side so the
/// model never controls them.
#[derive(Debug, Deserialize)]
struct QuestionDraft {
    prompt: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    difficulty: Difficulty,
    #[serde(default)]
    focuses: Vec<String>,
    #[serde(default)]
    context: String,
    #[serde(default)]
    requires_coding: bool,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    constraints: Vec<String>,
}

pub struct LlmQuestionSource(pub LlmClient);

/// The model is untrusted on set size as much as on content: an empty or
/// padded array must not reach persistence.
fn check_set_size(got: usize, requested: usize) -> Result<(), AppError> {
    if got != requested {
        return Err(AppError::Llm(format!(
            "LLM returned {got} questions, expected {requested}"
        )));
    }
    Ok(())
}

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    async fn generate(
        &self,
        profile: &CandidateProfile,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        profile.validate()?;
        if count == 0 || count > MAX_QUESTIONS {
            return Err(AppError::Validation(format!(
                "question count must be between 1 and {MAX_QUESTIONS}"
            )));
        }

        let prompt = QUESTION_GEN_PROMPT
            .replace("{count}", &count.to_string())
            .replace("{role}", profile.role.trim())
            .replace("{level}", profile.experience_level.as_str())
            .replace("{skills}", &profile.resume_skills.join(", "));

        let drafts: Vec<QuestionDraft> = self
            .0
            .call_json(&prompt, QUESTION_GEN_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;
        check_set_size(drafts.len(), count)?;

        let questions: Vec<InterviewQuestion> = drafts
            .into_iter()
            .map(|d| InterviewQuestion {
                id: Uuid::new_v4(),
                prompt: d.prompt,
                question_type: d.question_type,
                difficulty: d.difficulty,
                focuses: d.focuses,
                context: d.context,
                requires_coding: d.requires_coding,
                languages: d.languages,
                constraints: d.constraints,
            })
            .collect();

        // The model is untrusted as a producer; re-check the contract.
        for q in &questions {
            q.validate()
                .map_err(|e| AppError::Llm(format!("LLM produced an invalid question: {e}")))?;
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::ExperienceLevel;
    use std::collections::HashSet;

    fn profile(level: ExperienceLevel, skills: Vec<&str>) -> CandidateProfile {
        CandidateProfile {
            role: "Backend Engineer".to_string(),
            experience_level: level,
            technical_score: 60.0,
            communication_score: 60.0,
            confidence_score: 60.0,
            resume_skills: skills.into_iter().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn test_bank_generates_requested_count() {
        let qs = BankQuestionSource
            .generate(&profile(ExperienceLevel::OneToThree, vec!["rust"]), 8)
            .await
            .unwrap();
        assert_eq!(qs.len(), 8);
    }

    #[tokio::test]
    async fn test_bank_rejects_zero_and_oversized_counts() {
        let p = profile(ExperienceLevel::OneToThree, vec!["rust"]);
        assert!(BankQuestionSource.generate(&p, 0).await.is_err());
        assert!(BankQuestionSource.generate(&p, MAX_QUESTIONS + 1).await.is_err());
    }

    #[tokio::test]
    async fn test_bank_rejects_invalid_profile() {
        let mut p = profile(ExperienceLevel::Fresher, vec![]);
        p.technical_score = 200.0;
        assert!(BankQuestionSource.generate(&p, 5).await.is_err());
    }

    #[tokio::test]
    async fn test_bank_question_ids_are_unique() {
        let qs = BankQuestionSource
            .generate(&profile(ExperienceLevel::ThreeToFive, vec!["go"]), 10)
            .await
            .unwrap();
        let ids: HashSet<_> = qs.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), qs.len());
    }

    #[tokio::test]
    async fn test_bank_coding_questions_always_have_languages() {
        let qs = BankQuestionSource
            .generate(&profile(ExperienceLevel::Fresher, vec![]), 12)
            .await
            .unwrap();
        let coding: Vec<_> = qs.iter().filter(|q| q.requires_coding).collect();
        assert!(!coding.is_empty());
        for q in coding {
            assert_eq!(q.question_type, QuestionType::Coding);
            assert!(!q.languages.is_empty());
            assert!(!q.constraints.is_empty());
        }
    }

    #[tokio::test]
    async fn test_bank_non_coding_questions_carry_no_coding_fields() {
        let qs = BankQuestionSource
            .generate(&profile(ExperienceLevel::OneToThree, vec!["rust"]), 8)
            .await
            .unwrap();
        for q in qs.iter().filter(|q| !q.requires_coding) {
            assert!(q.languages.is_empty());
            assert!(q.constraints.is_empty());
        }
    }

    #[test]
    fn test_languages_prefer_resume_order() {
        let p = profile(ExperienceLevel::OneToThree, vec!["Kafka", "Go", "Rust"]);
        assert_eq!(languages_for(&p), vec!["go".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_languages_default_when_resume_has_none() {
        let p = profile(ExperienceLevel::OneToThree, vec!["excel"]);
        assert_eq!(
            languages_for(&p),
            vec!["python".to_string(), "javascript".to_string()]
        );
    }

    #[test]
    fn test_build_question_substitutes_role_and_focus() {
        let p = profile(ExperienceLevel::OneToThree, vec!["rust"]);
        let q = build_question(&p, QuestionType::Technical, Difficulty::Core, "rust");
        assert!(q.prompt.contains("rust"));
        assert!(!q.prompt.contains("{focus}"));
        assert!(!q.prompt.contains("{role}"));
        assert_eq!(q.focuses, vec!["rust".to_string()]);
    }

    #[test]
    fn test_llm_set_size_must_match_request() {
        assert!(check_set_size(5, 5).is_ok());
        // An empty reply or an over-long one is rejected before any draft
        // reaches the caller.
        assert!(matches!(check_set_size(0, 5), Err(AppError::Llm(_))));
        assert!(matches!(check_set_size(50, 5), Err(AppError::Llm(_))));
        assert!(matches!(check_set_size(4, 5), Err(AppError::Llm(_))));
    }

    #[test]
    fn test_every_template_cell_is_nonempty() {
        for qt in [
            QuestionType::Technical,
            QuestionType::Behavioral,
            QuestionType::Coding,
            QuestionType::SystemDesign,
            QuestionType::Managerial,
        ] {
            for d in [Difficulty::Intro, Difficulty::Core, Difficulty::Deep] {
                let (prompt, context) = template(qt, d);
                assert!(!prompt.is_empty());
                assert!(!context.is_empty());
            }
        }
    }
}
