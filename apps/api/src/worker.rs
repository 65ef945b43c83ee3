//! Background readiness-scoring worker.
//!
//! Jobs arrive on the Redis list `interview:scoring` as JSON `ScoringJob`
//! payloads pushed by the complete-interview endpoint. The worker blends the
//! three scores into a readiness figure and writes it back to the session
//! row. Malformed jobs are logged and skipped; pop failures back off and
//! retry. There is no retry ledger or backpressure beyond the list itself.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::db::create_pool;
use crate::interview::scoring::{compute_readiness, ScoreWeights, SessionScores};

/// Redis list the API pushes scoring jobs onto.
pub const SCORING_QUEUE: &str = "interview:scoring";

/// Seconds a blocking pop waits before returning empty, bounding shutdown
/// latency.
const POP_TIMEOUT_SECS: f64 = 5.0;
/// Backoff after a queue error before the next pop attempt.
const ERROR_BACKOFF_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringJob {
    pub session_id: Uuid,
    pub technical: f64,
    pub communication: f64,
    pub confidence: f64,
}

/// Source of scoring jobs. The Redis list is the production implementation;
/// the seam exists so the loop's drain behavior is testable without a
/// broker.
#[async_trait]
pub trait JobQueue: Send {
    /// Waits up to the pop timeout for a job. Ok(None) means the queue was
    /// quiet or the payload was malformed.
    async fn pop(&mut self) -> Result<Option<ScoringJob>>;
}

pub struct RedisQueue(MultiplexedConnection);

#[async_trait]
impl JobQueue for RedisQueue {
    async fn pop(&mut self) -> Result<Option<ScoringJob>> {
        let popped: Option<(String, String)> =
            self.0.blpop(SCORING_QUEUE, POP_TIMEOUT_SECS).await?;
        let Some((_, payload)) = popped else {
            return Ok(None);
        };
        match parse_job(&payload) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                warn!("Dropping malformed scoring job: {e} (payload: {payload})");
                Ok(None)
            }
        }
    }
}

/// A running worker. Dropping the handle does not stop the task; call
/// `stop` to shut down cleanly.
pub struct Worker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Connects to Postgres and Redis, then spawns the job loop. Any
    /// connection failure here is a startup failure the binary must treat
    /// as fatal.
    pub async fn start(config: &Config) -> Result<Worker> {
        let pool = create_pool(&config.database_url).await?;
        let client = redis::Client::open(config.redis_url.clone())
            .context("Invalid REDIS_URL")?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(RedisQueue(conn), shutdown_rx, move |job| {
            let pool = pool.clone();
            async move { process_job(&pool, &job).await }
        }));
        info!("Scoring worker started, polling '{SCORING_QUEUE}'");

        Ok(Worker { shutdown, handle })
    }

    /// Signals the loop to stop and waits for it to drain the current job.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!("Worker task panicked during shutdown: {e}");
        }
    }
}

/// Pops and handles jobs until shutdown. BLPOP is not cancellation-safe, so
/// the shutdown flag is only checked between pops: a payload that was
/// already popped is always handled before the loop exits. The pop timeout
/// bounds how long that check can be deferred.
async fn run_loop<Q, H, Fut>(mut queue: Q, shutdown: watch::Receiver<bool>, mut handle: H)
where
    Q: JobQueue,
    H: FnMut(ScoringJob) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    while !*shutdown.borrow() {
        match queue.pop().await {
            Ok(Some(job)) => {
                let session_id = job.session_id;
                if let Err(e) = handle(job).await {
                    error!("Failed to process job for session {session_id}: {e:?}");
                }
            }
            Ok(None) => {} // timeout or malformed payload, keep polling
            Err(e) => {
                warn!("Queue pop failed, backing off: {e}");
                tokio::time::sleep(std::time::Duration::from_secs(ERROR_BACKOFF_SECS)).await;
            }
        }
    }
    info!("Worker loop stopping");
}

pub fn parse_job(payload: &str) -> Result<ScoringJob> {
    serde_json::from_str(payload).context("Scoring job payload is not valid JSON")
}

async fn process_job(pool: &PgPool, job: &ScoringJob) -> Result<()> {
    let scores = SessionScores {
        technical: job.technical,
        communication: job.communication,
        confidence: job.confidence,
    };
    let readiness = compute_readiness(scores, &ScoreWeights::default());

    let result = sqlx::query(
        "UPDATE interview_sessions SET readiness_score = $1, status = 'scored' WHERE id = $2",
    )
    .bind(readiness)
    .bind(job.session_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        warn!("Scoring job for unknown session {}", job.session_id);
    } else {
        info!(
            "Session {} scored: readiness {readiness:.1}",
            job.session_id
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn job() -> ScoringJob {
        ScoringJob {
            session_id: Uuid::new_v4(),
            technical: 80.0,
            communication: 60.0,
            confidence: 40.0,
        }
    }

    #[test]
    fn test_parse_job_round_trip() {
        let job = job();
        let payload = serde_json::to_string(&job).unwrap();
        let parsed = parse_job(&payload).unwrap();
        assert_eq!(parsed.session_id, job.session_id);
    }

    #[test]
    fn test_parse_job_rejects_garbage() {
        assert!(parse_job("not json").is_err());
        assert!(parse_job("{\"session_id\": 42}").is_err());
    }

    /// Queue that flags shutdown from inside `pop`, then hands out its jobs.
    /// Models a stop signal arriving while a pop is in flight.
    struct ScriptedQueue {
        jobs: Vec<ScoringJob>,
        shutdown: watch::Sender<bool>,
        pops: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl JobQueue for ScriptedQueue {
        async fn pop(&mut self) -> Result<Option<ScoringJob>> {
            *self.pops.lock().unwrap() += 1;
            let _ = self.shutdown.send(true);
            Ok(self.jobs.pop())
        }
    }

    #[tokio::test]
    async fn test_job_popped_during_shutdown_is_still_processed() {
        let (tx, rx) = watch::channel(false);
        let job = job();
        let expected = job.session_id;
        let pops = Arc::new(Mutex::new(0));
        let queue = ScriptedQueue {
            jobs: vec![job],
            shutdown: tx,
            pops: pops.clone(),
        };

        let seen: Arc<Mutex<Vec<Uuid>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        run_loop(queue, rx, move |job| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(job.session_id);
                Ok(())
            }
        })
        .await;

        // Exactly one pop, and its payload was handled before exit.
        assert_eq!(*pops.lock().unwrap(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn test_loop_exits_without_popping_once_stopped() {
        let (tx, rx) = watch::channel(true);
        let pops = Arc::new(Mutex::new(0));
        let queue = ScriptedQueue {
            jobs: vec![job()],
            shutdown: tx,
            pops: pops.clone(),
        };

        run_loop(queue, rx, |_| async { Ok(()) }).await;
        assert_eq!(*pops.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_start_fails_on_invalid_redis_url() {
        let config = Config {
            database_url: "not-a-database-url".to_string(),
            redis_url: "definitely not a url".to_string(),
            anthropic_api_key: String::new(),
            port: 8080,
            rust_log: "info".to_string(),
            debug_auth: false,
            production: false,
            llm_questions: false,
        };
        // Postgres connect fails first or the Redis URL parse fails; either
        // way startup must surface an error for the binary to exit 1 on.
        assert!(Worker::start(&config).await.is_err());
    }
}
