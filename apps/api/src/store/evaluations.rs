use sqlx::PgPool;

use crate::models::interview::EvaluationRow;

pub async fn create_evaluation(
    pool: &PgPool,
    interview_id: i64,
    evaluation_text: &str,
    score: f64,
    feedback: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO evaluations (interview_id, evaluation_text, score, feedback)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(interview_id)
    .bind(evaluation_text)
    .bind(score)
    .bind(feedback)
    .fetch_one(pool)
    .await
}

/// The most recent evaluation for an interview, if one exists.
pub async fn get_interview_evaluation(
    pool: &PgPool,
    interview_id: i64,
) -> Result<Option<EvaluationRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM evaluations WHERE interview_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(interview_id)
    .fetch_optional(pool)
    .await
}
