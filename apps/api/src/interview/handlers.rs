//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::InterviewQuestion;
use crate::interview::scoring::SessionScores;
use crate::models::interview::{InterviewQuestionRow, InterviewSessionRow};
use crate::models::profile::CandidateProfileRow;
use crate::models::user::AuthUser;
use crate::state::AppState;
use crate::worker::{ScoringJob, SCORING_QUEUE};

const DEFAULT_QUESTION_COUNT: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct CreateInterviewRequest {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CreateInterviewResponse {
    pub session_id: Uuid,
    pub role: String,
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetailResponse {
    pub session: InterviewSessionRow,
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteInterviewRequest {
    pub technical_score: f64,
    pub communication_score: f64,
    pub confidence_score: f64,
}

#[derive(Debug, Serialize)]
pub struct CompleteInterviewResponse {
    pub session_id: Uuid,
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Generates a question set from the caller's stored profile via the
/// configured question engine and persists session + questions.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<CreateInterviewResponse>), AppError> {
    let row: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE user_id = $1")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let profile = row
        .ok_or_else(|| {
            AppError::UnprocessableEntity(
                "No candidate profile on file — create one before starting an interview"
                    .to_string(),
            )
        })?
        .into_profile()?;

    let count = request.count.unwrap_or(DEFAULT_QUESTION_COUNT);
    let questions = state.question_source.generate(&profile, count).await?;

    let session_id = Uuid::new_v4();
    let mut tx = state.db.begin().await?;
    sqlx::query("INSERT INTO interview_sessions (id, user_id, role, status) VALUES ($1, $2, $3, 'pending')")
        .bind(session_id)
        .bind(user.id)
        .bind(&profile.role)
        .execute(&mut *tx)
        .await?;
    for (position, q) in questions.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO interview_questions
                (id, session_id, position, prompt, question_type, difficulty,
                 focuses, context, requires_coding, languages, coding_constraints)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(q.id)
        .bind(session_id)
        .bind(position as i32)
        .bind(&q.prompt)
        .bind(q.question_type.as_str())
        .bind(q.difficulty.as_str())
        .bind(&q.focuses)
        .bind(&q.context)
        .bind(q.requires_coding)
        .bind(&q.languages)
        .bind(&q.constraints)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!(
        "Created interview session {session_id} with {} questions for user {}",
        questions.len(),
        user.id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateInterviewResponse {
            session_id,
            role: profile.role,
            questions,
        }),
    ))
}

/// GET /api/v1/interviews/:id
///
/// Returns the session row and its questions in interview order. Sessions
/// belonging to other users are indistinguishable from missing ones.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let session: InterviewSessionRow =
        sqlx::query_as("SELECT * FROM interview_sessions WHERE id = $1 AND user_id = $2")
            .bind(session_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {session_id} not found")))?;

    let rows: Vec<InterviewQuestionRow> = sqlx::query_as(
        "SELECT * FROM interview_questions WHERE session_id = $1 ORDER BY position",
    )
    .bind(session_id)
    .fetch_all(&state.db)
    .await?;

    let questions = rows
        .into_iter()
        .map(InterviewQuestionRow::into_question)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(InterviewDetailResponse { session, questions }))
}

/// POST /api/v1/interviews/:id/complete
///
/// Records the three scores, marks the session completed, and enqueues a
/// readiness-scoring job for the worker.
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CompleteInterviewRequest>,
) -> Result<(StatusCode, Json<CompleteInterviewResponse>), AppError> {
    let scores = SessionScores {
        technical: request.technical_score,
        communication: request.communication_score,
        confidence: request.confidence_score,
    };
    scores.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE interview_sessions
        SET technical_score = $1, communication_score = $2, confidence_score = $3,
            status = 'completed'
        WHERE id = $4 AND user_id = $5
        "#,
    )
    .bind(scores.technical)
    .bind(scores.communication)
    .bind(scores.confidence)
    .bind(session_id)
    .bind(user.id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Interview {session_id} not found"
        )));
    }

    let job = ScoringJob {
        session_id,
        technical: scores.technical,
        communication: scores.communication,
        confidence: scores.confidence,
    };
    let payload =
        serde_json::to_string(&job).map_err(|e| AppError::Queue(e.to_string()))?;
    let mut conn = state
        .redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Queue(e.to_string()))?;
    conn.rpush::<_, _, ()>(SCORING_QUEUE, payload)
        .await
        .map_err(|e| AppError::Queue(e.to_string()))?;

    info!("Queued readiness scoring for session {session_id}");

    Ok((
        StatusCode::ACCEPTED,
        Json(CompleteInterviewResponse {
            session_id,
            status: "queued".to_string(),
        }),
    ))
}
