// src/repositories/postgres/forums.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use campushub_common::models::{ForumComment, ForumThread};
use campushub_common::traits::repository_traits::ForumRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresForumRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresForumRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForumRepository for PostgresForumRepository {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO forums (
                forum_id, title, category, description, created_by,
                is_active, likes, comments_count, created_at, last_activity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
            .bind(thread.forum_id)
            .bind(&thread.title)
            .bind(&thread.category)
            .bind(&thread.description)
            .bind(&thread.created_by)
            .bind(thread.is_active)
            .bind(thread.likes)
            .bind(thread.comments_count)
            .bind(thread.created_at)
            .bind(thread.last_activity)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_thread(&self, forum_id: Uuid) -> Result<Option<ForumThread>, Error> {
        let row = sqlx::query_as::<_, ForumThread>(
            r#"
            SELECT forum_id, title, category, description, created_by,
                   is_active, likes, comments_count, created_at, last_activity
            FROM forums
            WHERE forum_id = $1
            "#,
        )
            .bind(forum_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_threads(&self) -> Result<Vec<ForumThread>, Error> {
        let rows = sqlx::query_as::<_, ForumThread>(
            r#"
            SELECT forum_id, title, category, description, created_by,
                   is_active, likes, comments_count, created_at, last_activity
            FROM forums
            ORDER BY last_activity DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_thread(&self, forum_id: Uuid) -> Result<(), Error> {
        // Comments and like rows go with the thread via ON DELETE CASCADE.
        sqlx::query("DELETE FROM forums WHERE forum_id = $1")
            .bind(forum_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_comment(&self, comment: &ForumComment) -> Result<(), Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO forum_comments (
                comment_id, forum_id, body, created_by, likes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
            .bind(comment.comment_id)
            .bind(comment.forum_id)
            .bind(&comment.body)
            .bind(&comment.created_by)
            .bind(comment.likes)
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE forums
            SET comments_count = comments_count + 1,
                last_activity = $2
            WHERE forum_id = $1
            "#,
        )
            .bind(comment.forum_id)
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_comments(&self, forum_id: Uuid) -> Result<Vec<ForumComment>, Error> {
        let rows = sqlx::query_as::<_, ForumComment>(
            r#"
            SELECT comment_id, forum_id, body, created_by, likes, created_at
            FROM forum_comments
            WHERE forum_id = $1
            ORDER BY created_at ASC
            "#,
        )
            .bind(forum_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn toggle_thread_like(
        &self,
        forum_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(
            r#"
            SELECT 1 AS present
            FROM forum_likes
            WHERE forum_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
            .bind(forum_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let liked = if existing.is_some() {
            sqlx::query(
                r#"
                DELETE FROM forum_likes
                WHERE forum_id = $1 AND user_id = $2
                "#,
            )
                .bind(forum_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                UPDATE forums
                SET likes = likes - 1
                WHERE forum_id = $1
                "#,
            )
                .bind(forum_id)
                .execute(&mut *tx)
                .await?;

            false
        } else {
            sqlx::query(
                r#"
                INSERT INTO forum_likes (forum_id, user_id, liked_at)
                VALUES ($1, $2, $3)
                "#,
            )
                .bind(forum_id)
                .bind(user_id)
                .bind(at)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                UPDATE forums
                SET likes = likes + 1
                WHERE forum_id = $1
                "#,
            )
                .bind(forum_id)
                .execute(&mut *tx)
                .await?;

            true
        };

        tx.commit().await?;
        Ok(liked)
    }

    async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(
            r#"
            SELECT 1 AS present
            FROM forum_comment_likes
            WHERE comment_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
            .bind(comment_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let liked = if existing.is_some() {
            sqlx::query(
                r#"
                DELETE FROM forum_comment_likes
                WHERE comment_id = $1 AND user_id = $2
                "#,
            )
                .bind(comment_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                UPDATE forum_comments
                SET likes = likes - 1
                WHERE comment_id = $1
                "#,
            )
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;

            false
        } else {
            sqlx::query(
                r#"
                INSERT INTO forum_comment_likes (comment_id, user_id, liked_at)
                VALUES ($1, $2, $3)
                "#,
            )
                .bind(comment_id)
                .bind(user_id)
                .bind(at)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                UPDATE forum_comments
                SET likes = likes + 1
                WHERE comment_id = $1
                "#,
            )
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;

            true
        };

        tx.commit().await?;
        Ok(liked)
    }
}
