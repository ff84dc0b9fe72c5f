use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the four application tables if they do not exist yet.
/// Idempotent, so it runs unconditionally at startup.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            BIGSERIAL PRIMARY KEY,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interviews (
            id               BIGSERIAL PRIMARY KEY,
            user_id          BIGINT NOT NULL REFERENCES users(id),
            cv_filename      TEXT,
            cv_analysis      TEXT,
            question_count   INT NOT NULL,
            difficulty_level TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'in_progress',
            score            DOUBLE PRECISION,
            created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
            completed_at     TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id             BIGSERIAL PRIMARY KEY,
            interview_id   BIGINT NOT NULL REFERENCES interviews(id),
            question_text  TEXT NOT NULL,
            question_order INT NOT NULL,
            answer_text    TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS evaluations (
            id              BIGSERIAL PRIMARY KEY,
            interview_id    BIGINT NOT NULL REFERENCES interviews(id),
            evaluation_text TEXT NOT NULL,
            score           DOUBLE PRECISION NOT NULL,
            feedback        TEXT NOT NULL,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
