//! Question-set planning — pure, deterministic mapping from a candidate
//! profile to the difficulty and type mix of a generated interview.
//!
//! The experience band is consumed strictly as an ordinal; the technical
//! score nudges the tier one step either way.

use crate::interview::models::{CandidateProfile, Difficulty, ExperienceLevel, QuestionType};

/// (intro, core, deep) weight per tier. Tier 0 never plans deep questions,
/// tier 3 never plans intro questions.
const TIER_WEIGHTS: [(f64, f64, f64); 4] = [
    (0.6, 0.4, 0.0),
    (0.3, 0.5, 0.2),
    (0.1, 0.5, 0.4),
    (0.0, 0.4, 0.6),
];

const HIGH_TECHNICAL: f64 = 75.0;
const LOW_TECHNICAL: f64 = 40.0;

/// Effective tier 0–3: the experience ordinal, bumped up by a strong
/// technical score and down by a weak one.
pub fn experience_tier(profile: &CandidateProfile) -> u8 {
    let mut tier = profile.experience_level.rank();
    if profile.technical_score >= HIGH_TECHNICAL {
        tier = tier.saturating_add(1);
    } else if profile.technical_score < LOW_TECHNICAL {
        tier = tier.saturating_sub(1);
    }
    tier.min(3)
}

/// Plans `count` difficulties for the profile, ordered easy to hard.
pub fn plan_difficulties(profile: &CandidateProfile, count: usize) -> Vec<Difficulty> {
    let (w_intro, _, w_deep) = TIER_WEIGHTS[experience_tier(profile) as usize];

    let mut intro = (w_intro * count as f64).round() as usize;
    let mut deep = (w_deep * count as f64).round() as usize;
    // Rounding can overshoot by one on tiny counts; trim the tail end first.
    while intro + deep > count {
        if deep > 0 {
            deep -= 1;
        } else {
            intro -= 1;
        }
    }
    let core = count - intro - deep;

    let mut plan = Vec::with_capacity(count);
    plan.extend(std::iter::repeat(Difficulty::Intro).take(intro));
    plan.extend(std::iter::repeat(Difficulty::Core).take(core));
    plan.extend(std::iter::repeat(Difficulty::Deep).take(deep));
    plan
}

/// Question types available to a band. Managerial rounds only open up at
/// 3-5, system design at 1-3.
pub fn allowed_types(level: ExperienceLevel) -> &'static [QuestionType] {
    match level {
        ExperienceLevel::Fresher => &[
            QuestionType::Technical,
            QuestionType::Behavioral,
            QuestionType::Coding,
        ],
        ExperienceLevel::OneToThree => &[
            QuestionType::Technical,
            QuestionType::Behavioral,
            QuestionType::Coding,
            QuestionType::SystemDesign,
        ],
        ExperienceLevel::ThreeToFive | ExperienceLevel::FivePlus => &[
            QuestionType::Technical,
            QuestionType::Behavioral,
            QuestionType::Coding,
            QuestionType::SystemDesign,
            QuestionType::Managerial,
        ],
    }
}

/// Plans `count` question types by cycling the band's allowed set.
pub fn plan_types(profile: &CandidateProfile, count: usize) -> Vec<QuestionType> {
    let allowed = allowed_types(profile.experience_level);
    (0..count).map(|i| allowed[i % allowed.len()]).collect()
}

/// Focus tag for the i-th question: resume skills in extraction order,
/// cycling; role-derived fallback when the resume yielded nothing.
pub fn focus_for(profile: &CandidateProfile, index: usize) -> String {
    if profile.resume_skills.is_empty() {
        format!("{} fundamentals", profile.role.trim().to_lowercase())
    } else {
        profile.resume_skills[index % profile.resume_skills.len()].clone()
    }
}
