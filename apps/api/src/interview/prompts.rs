// Interview engine LLM prompt templates.
// All prompts for the interview module are defined here.

pub const QUESTION_GEN_SYSTEM: &str = "\
You are an experienced technical interviewer generating mock interview questions. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Ground every question in the candidate's stated role and resume skills. \
Every question with requires_coding=true MUST include at least one language.";

pub const QUESTION_GEN_PROMPT: &str = r#"Generate exactly {count} mock interview questions for this candidate.

CANDIDATE:
- role: {role}
- experience band: {level} (one of fresher | 1-3 | 3-5 | 5+ years)
- resume skills, most prominent first: {skills}

OUTPUT SCHEMA (return exactly a JSON array of this object):
[
  {
    "prompt": "string — the question text",
    "type": "technical" | "behavioral" | "coding" | "system-design" | "managerial",
    "difficulty": "intro" | "core" | "deep",
    "focuses": ["string — topic tags"],
    "context": "string — one-sentence scenario for the interviewer",
    "requires_coding": boolean,
    "languages": ["string"],   // non-empty when requires_coding is true, else []
    "constraints": ["string"]  // time/complexity limits, only for coding questions
  }
]

RULES:
- Match difficulty to the experience band: fresher leans intro, 5+ leans deep.
- Only include "managerial" for the 3-5 and 5+ bands.
- Draw focuses from the resume skills where possible."#;
