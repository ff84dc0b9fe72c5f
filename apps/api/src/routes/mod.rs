pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Leave headroom over the CV cap for the other multipart fields
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth_handlers::handle_register))
        .route("/api/v1/auth/login", post(auth_handlers::handle_login))
        .route("/api/v1/users/:id", get(auth_handlers::handle_get_profile))
        // Interviews
        .route(
            "/api/v1/interviews",
            post(interview_handlers::handle_create_interview)
                .get(interview_handlers::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interview_handlers::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(interview_handlers::handle_complete_interview),
        )
        .route(
            "/api/v1/interviews/:id/evaluation",
            get(interview_handlers::handle_get_evaluation),
        )
        .route(
            "/api/v1/questions/:id/answer",
            post(interview_handlers::handle_answer_question),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
