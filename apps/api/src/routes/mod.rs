pub mod csrf;
pub mod debug;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::auth::middleware::require_session;
use crate::interview::handlers as interview_handlers;
use crate::profile::handlers as profile_handlers;
use crate::profile::resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything under /api/v1 sits behind the session guard.
    let protected = Router::new()
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile).put(profile_handlers::handle_put_profile),
        )
        .route("/api/v1/profile/resume", post(resume::handle_upload_resume))
        .route(
            "/api/v1/interviews",
            post(interview_handlers::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interview_handlers::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(interview_handlers::handle_complete_interview),
        )
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/csrf", get(csrf::csrf_handler))
        .route("/api/debug/cookies", get(debug::debug_cookies_handler))
        .route("/auth/signup", post(auth_handlers::handle_signup))
        .route("/auth/login", post(auth_handlers::handle_login))
        .route("/auth/logout", post(auth_handlers::handle_logout))
        .merge(protected)
        .with_state(state)
}
