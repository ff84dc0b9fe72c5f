use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// User persistence operations. Trait seam so the credential service can be
/// exercised against an in-memory store in tests, same pattern as
/// `CompletionClient`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Returns `None` when the username or email is
    /// already taken, leaving existing rows untouched.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<i64>, sqlx::Error>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, sqlx::Error>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error>;

    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserRow>, sqlx::Error>;
}

#[async_trait]
impl UserStore for PgPool {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self)
        .await;

        match result {
            Ok(id) => Ok(Some(id)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self)
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self)
            .await
    }

    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self)
            .await
    }
}
