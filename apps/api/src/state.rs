use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::interview::question_bank::QuestionSource;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client used to enqueue readiness-scoring jobs for the worker.
    pub redis: RedisClient,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable question engine. Default: BankQuestionSource. Swap via ENABLE_LLM_QUESTIONS env.
    pub question_source: Arc<dyn QuestionSource>,
    /// Session token resolver backing the dashboard guard middleware.
    pub sessions: Arc<dyn SessionStore>,
}
