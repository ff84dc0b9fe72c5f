use sqlx::PgPool;

use crate::models::interview::QuestionRow;

pub async fn add_question(
    pool: &PgPool,
    interview_id: i64,
    question_text: &str,
    question_order: i32,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (interview_id, question_text, question_order)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(interview_id)
    .bind(question_text)
    .bind(question_order)
    .fetch_one(pool)
    .await
}

pub async fn get_question(
    pool: &PgPool,
    question_id: i64,
) -> Result<Option<QuestionRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM questions WHERE id = $1")
        .bind(question_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_question_answer(
    pool: &PgPool,
    question_id: i64,
    answer_text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE questions SET answer_text = $1 WHERE id = $2")
        .bind(answer_text)
        .bind(question_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// All questions for an interview, in asking order.
pub async fn get_interview_questions(
    pool: &PgPool,
    interview_id: i64,
) -> Result<Vec<QuestionRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM questions WHERE interview_id = $1 ORDER BY question_order")
        .bind(interview_id)
        .fetch_all(pool)
        .await
}
