// src/repositories/postgres/feedback.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::Feedback;
use campushub_common::traits::repository_traits::FeedbackRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresFeedbackRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO feedback (
                feedback_id, user_id, content, admin_response, created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(feedback.feedback_id)
            .bind(feedback.user_id)
            .bind(&feedback.content)
            .bind(&feedback.admin_response)
            .bind(feedback.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<Feedback>, Error> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT feedback_id, user_id, content, admin_response, created_at
            FROM feedback
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Feedback>, Error> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT feedback_id, user_id, content, admin_response, created_at
            FROM feedback
            ORDER BY created_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn set_admin_response(&self, feedback_id: Uuid, response: &str) -> Result<bool, Error> {
        let res = sqlx::query(
            r#"
            UPDATE feedback
            SET admin_response = $2
            WHERE feedback_id = $1
            "#,
        )
            .bind(feedback_id)
            .bind(response)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn delete(&self, feedback_id: Uuid) -> Result<(), Error> {
        sqlx::query("DELETE FROM feedback WHERE feedback_id = $1")
            .bind(feedback_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
