//! Worker entry point. Takes no arguments; startup failure logs the error
//! and exits 1. Once running, the process blocks on explicit shutdown
//! triggers (SIGINT/ctrl-c, and SIGTERM on unix) rather than holding stdin
//! open, then stops the job loop cleanly.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mockmate_api::config::Config;
use mockmate_api::worker::Worker;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Worker failed to start: {e:?}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("mockmate_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MockMate worker v{}", env!("CARGO_PKG_VERSION"));

    let worker = match Worker::start(&config).await {
        Ok(w) => w,
        Err(e) => {
            error!("Worker failed to start: {e:?}");
            std::process::exit(1);
        }
    };

    shutdown_signal().await;
    info!("Shutdown signal received, stopping worker");
    worker.stop().await;
}

/// Resolves on SIGINT (ctrl-c) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
