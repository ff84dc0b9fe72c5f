use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Interview status values. Stored as plain text in the `status` column.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: i64,
    pub user_id: i64,
    pub cv_filename: Option<String>,
    pub cv_analysis: Option<String>,
    pub question_count: i32,
    pub difficulty_level: String,
    pub status: String,
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub interview_id: i64,
    pub question_text: String,
    pub question_order: i32,
    pub answer_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvaluationRow {
    pub id: i64,
    pub interview_id: i64,
    pub evaluation_text: String,
    pub score: f64,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}
