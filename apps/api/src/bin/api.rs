use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mockmate_api::auth::session::PgSessionStore;
use mockmate_api::config::Config;
use mockmate_api::db::create_pool;
use mockmate_api::interview::question_bank::{
    BankQuestionSource, LlmQuestionSource, QuestionSource,
};
use mockmate_api::llm_client::LlmClient;
use mockmate_api::routes::build_router;
use mockmate_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("mockmate_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MockMate API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (scoring job queue)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());

    // Question engine: deterministic bank by default, LLM via ENABLE_LLM_QUESTIONS
    let question_source: Arc<dyn QuestionSource> = if config.llm_questions {
        info!("Question engine: LLM (model: {})", mockmate_api::llm_client::MODEL);
        Arc::new(LlmQuestionSource(llm.clone()))
    } else {
        info!("Question engine: template bank");
        Arc::new(BankQuestionSource)
    };

    let sessions = Arc::new(PgSessionStore::new(db.clone()));

    let state = AppState {
        db,
        redis,
        llm,
        config: config.clone(),
        question_source,
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
