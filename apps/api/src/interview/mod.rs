pub mod handlers;
pub mod models;
pub mod prompts;
pub mod question_bank;
pub mod scoring;
pub mod selection;
