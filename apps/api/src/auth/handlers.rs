use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth;
use crate::errors::AppError;
use crate::models::interview::STATUS_COMPLETED;
use crate::models::user::UserInfo;
use crate::state::AppState;
use crate::store::interviews::InterviewStore;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    let user = auth::register_user(&state.db, &req.username, &req.email, &req.password).await?;
    info!("Registered user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserInfo>, AppError> {
    let user = auth::login_user(&state.db, &req.username, &req.password).await?;
    info!("User {} logged in", user.id);
    Ok(Json(user))
}

#[derive(Debug, serde::Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserInfo,
    pub total_interviews: usize,
    pub completed_interviews: usize,
    pub average_score: Option<f64>,
}

/// GET /api/v1/users/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = auth::get_user_info(&state.db, user_id).await?;
    let rows = state.db.get_user_interviews(user_id).await?;

    let completed: Vec<_> = rows.iter().filter(|i| i.status == STATUS_COMPLETED).collect();
    let scores: Vec<f64> = completed.iter().filter_map(|i| i.score).collect();
    let average_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    Ok(Json(ProfileResponse {
        user,
        total_interviews: rows.len(),
        completed_interviews: completed.len(),
        average_score,
    }))
}
