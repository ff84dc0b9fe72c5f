use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::interview::{InterviewRow, STATUS_COMPLETED, STATUS_IN_PROGRESS};

/// Interview persistence operations. Trait seam so the status-transition
/// rules can be exercised against an in-memory store in tests.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn create_interview(
        &self,
        user_id: i64,
        cv_filename: Option<&str>,
        cv_analysis: Option<&str>,
        question_count: i32,
        difficulty_level: &str,
    ) -> Result<i64, sqlx::Error>;

    async fn get_interview(&self, interview_id: i64) -> Result<Option<InterviewRow>, sqlx::Error>;

    /// All interviews for a user, newest first.
    async fn get_user_interviews(&self, user_id: i64) -> Result<Vec<InterviewRow>, sqlx::Error>;

    /// Writes status and score. `completed_at` is only written when `Some`;
    /// `None` leaves the stored timestamp untouched.
    async fn set_status(
        &self,
        interview_id: i64,
        status: &str,
        score: Option<f64>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error>;
}

/// Updates status and score. Only a transition to `completed` stamps
/// `completed_at`; every other status leaves the timestamp untouched.
pub async fn update_interview_status(
    store: &dyn InterviewStore,
    interview_id: i64,
    status: &str,
    score: Option<f64>,
) -> Result<(), sqlx::Error> {
    let completed_at = (status == STATUS_COMPLETED).then(Utc::now);
    store
        .set_status(interview_id, status, score, completed_at)
        .await
}

#[async_trait]
impl InterviewStore for PgPool {
    async fn create_interview(
        &self,
        user_id: i64,
        cv_filename: Option<&str>,
        cv_analysis: Option<&str>,
        question_count: i32,
        difficulty_level: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO interviews
                (user_id, cv_filename, cv_analysis, question_count, difficulty_level, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(cv_filename)
        .bind(cv_analysis)
        .bind(question_count)
        .bind(difficulty_level)
        .bind(STATUS_IN_PROGRESS)
        .fetch_one(self)
        .await
    }

    async fn get_interview(&self, interview_id: i64) -> Result<Option<InterviewRow>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM interviews WHERE id = $1")
            .bind(interview_id)
            .fetch_optional(self)
            .await
    }

    async fn get_user_interviews(&self, user_id: i64) -> Result<Vec<InterviewRow>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(self)
            .await
    }

    async fn set_status(
        &self,
        interview_id: i64,
        status: &str,
        score: Option<f64>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        if let Some(ts) = completed_at {
            sqlx::query(
                "UPDATE interviews SET status = $1, score = $2, completed_at = $3 WHERE id = $4",
            )
            .bind(status)
            .bind(score)
            .bind(ts)
            .bind(interview_id)
            .execute(self)
            .await?;
        } else {
            sqlx::query("UPDATE interviews SET status = $1, score = $2 WHERE id = $3")
                .bind(status)
                .bind(score)
                .bind(interview_id)
                .execute(self)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory InterviewStore mirroring the SQL contract: `set_status`
    /// only writes `completed_at` when given a timestamp.
    #[derive(Default)]
    struct MemoryInterviewStore {
        rows: Mutex<Vec<InterviewRow>>,
    }

    #[async_trait]
    impl InterviewStore for MemoryInterviewStore {
        async fn create_interview(
            &self,
            user_id: i64,
            cv_filename: Option<&str>,
            cv_analysis: Option<&str>,
            question_count: i32,
            difficulty_level: &str,
        ) -> Result<i64, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(InterviewRow {
                id,
                user_id,
                cv_filename: cv_filename.map(str::to_string),
                cv_analysis: cv_analysis.map(str::to_string),
                question_count,
                difficulty_level: difficulty_level.to_string(),
                status: STATUS_IN_PROGRESS.to_string(),
                score: None,
                created_at: Utc::now(),
                completed_at: None,
            });
            Ok(id)
        }

        async fn get_interview(
            &self,
            interview_id: i64,
        ) -> Result<Option<InterviewRow>, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id == interview_id).cloned())
        }

        async fn get_user_interviews(
            &self,
            user_id: i64,
        ) -> Result<Vec<InterviewRow>, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|r| r.user_id == user_id).cloned().collect())
        }

        async fn set_status(
            &self,
            interview_id: i64,
            status: &str,
            score: Option<f64>,
            completed_at: Option<DateTime<Utc>>,
        ) -> Result<(), sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|r| r.id == interview_id) {
                row.status = status.to_string();
                row.score = score;
                if completed_at.is_some() {
                    row.completed_at = completed_at;
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_completed_status_stamps_timestamp_and_score() {
        let store = MemoryInterviewStore::default();
        let id = store
            .create_interview(1, None, None, 5, "medium")
            .await
            .unwrap();

        update_interview_status(&store, id, STATUS_COMPLETED, Some(87.5))
            .await
            .unwrap();

        let row = store.get_interview(id).await.unwrap().unwrap();
        assert_eq!(row.status, STATUS_COMPLETED);
        assert_eq!(row.score, Some(87.5));
        assert!(row.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_other_status_leaves_completion_timestamp_unset() {
        let store = MemoryInterviewStore::default();
        let id = store
            .create_interview(1, None, None, 5, "medium")
            .await
            .unwrap();

        update_interview_status(&store, id, STATUS_IN_PROGRESS, Some(10.0))
            .await
            .unwrap();

        let row = store.get_interview(id).await.unwrap().unwrap();
        assert_eq!(row.status, STATUS_IN_PROGRESS);
        assert_eq!(row.score, Some(10.0));
        assert!(row.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_new_interview_starts_in_progress_without_timestamp() {
        let store = MemoryInterviewStore::default();
        let id = store
            .create_interview(7, Some("cv.pdf"), Some("analysis"), 3, "easy")
            .await
            .unwrap();

        let row = store.get_interview(id).await.unwrap().unwrap();
        assert_eq!(row.status, STATUS_IN_PROGRESS);
        assert!(row.completed_at.is_none());
        assert!(row.score.is_none());
    }
}
