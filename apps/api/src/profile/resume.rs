//! Resume upload and skill extraction.
//!
//! A profile's `resume_skills` list is derived from the uploaded PDF: known
//! skills in first-occurrence order, matching how they read on the page.

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::state::AppState;

/// Skills the extractor recognizes. Matching is token-based so "go" and "c"
/// don't fire inside unrelated words; multi-token entries match as a token
/// sequence.
const SKILL_LEXICON: &[&str] = &[
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
    "sql",
    "postgres",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "docker",
    "kubernetes",
    "terraform",
    "aws",
    "gcp",
    "azure",
    "react",
    "node.js",
    "django",
    "spring",
    "graphql",
    "grpc",
    "linux",
    "git",
    "machine learning",
    "data analysis",
    "system design",
];

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub resume_skills: Vec<String>,
}

/// POST /api/v1/profile/resume
///
/// Accepts a multipart PDF under the `file` field, extracts its text, and
/// replaces the stored `resume_skills` with what the resume actually names.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut data: Option<bytes::Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            data = Some(field.bytes().await.map_err(|e| {
                AppError::Validation(format!("Failed to read uploaded file: {e}"))
            })?);
        }
    }
    let data = data.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let text = pdf_extract::extract_text_from_mem(&data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    let skills = extract_skills(&text);
    info!(
        "Extracted {} skills from resume for user {}",
        skills.len(),
        user.id
    );

    let result = sqlx::query(
        "UPDATE candidate_profiles SET resume_skills = $1, updated_at = now() WHERE user_id = $2",
    )
    .bind(&skills)
    .bind(user.id)
    .execute(&state.db)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Profile not found — create it before uploading a resume".to_string(),
        ));
    }

    Ok(Json(ResumeUploadResponse {
        resume_skills: skills,
    }))
}

/// Tokenizes resume text into lowercase tokens, keeping the symbols that
/// distinguish real skill names (c++, c#, node.js).
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Extracts lexicon skills from resume text, ordered by first occurrence and
/// deduplicated. The order is part of the contract: it mirrors how the
/// skills appear on the resume.
pub fn extract_skills(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut found: Vec<(usize, &str)> = Vec::new();

    for &skill in SKILL_LEXICON {
        let skill_tokens = tokenize(skill);
        if skill_tokens.is_empty() {
            continue;
        }
        let hit = tokens
            .windows(skill_tokens.len())
            .position(|w| w.iter().zip(&skill_tokens).all(|(a, b)| a == b));
        if let Some(pos) = hit {
            found.push((pos, skill));
        }
    }

    found.sort_by_key(|&(pos, _)| pos);
    found.into_iter().map(|(_, s)| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_ordered_by_first_occurrence() {
        let text = "Built services in Rust and Python, deployed on Kubernetes with Docker.";
        assert_eq!(
            extract_skills(text),
            vec!["rust", "python", "kubernetes", "docker"]
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(extract_skills("POSTGRES and TypeScript"), vec!["postgres", "typescript"]);
    }

    #[test]
    fn test_repeated_skill_reported_once() {
        let text = "Python scripts, more Python, and even more python.";
        assert_eq!(extract_skills(text), vec!["python"]);
    }

    #[test]
    fn test_short_names_do_not_match_inside_words() {
        // "go" must not fire on "Django category" and "c#"/"c++" need their symbols.
        let skills = extract_skills("Django apps in a good category using C code");
        assert!(!skills.contains(&"go".to_string()));
        assert!(!skills.contains(&"c#".to_string()));
        assert!(skills.contains(&"django".to_string()));
    }

    #[test]
    fn test_symbolic_names_match() {
        assert_eq!(extract_skills("C++ and C# and Node.js"), vec!["c++", "c#", "node.js"]);
    }

    #[test]
    fn test_multi_word_skills_match_as_sequence() {
        let skills = extract_skills("Focused on machine learning pipelines");
        assert!(skills.contains(&"machine learning".to_string()));
        // "machine" alone elsewhere must not produce the compound skill.
        assert!(!extract_skills("washing machine repair, lifelong learning")
            .contains(&"machine learning".to_string()));
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(extract_skills("").is_empty());
    }
}
