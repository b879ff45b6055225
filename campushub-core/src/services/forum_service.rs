// src/services/forum_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use campushub_common::models::{ForumComment, ForumThread};
use campushub_common::traits::repository_traits::ForumRepository;
use crate::Error;

pub struct ForumService {
    forum_repo: Arc<dyn ForumRepository + Send + Sync>,
}

impl ForumService {
    pub fn new(forum_repo: Arc<dyn ForumRepository + Send + Sync>) -> Self {
        Self { forum_repo }
    }

    pub async fn create_thread(
        &self,
        title: &str,
        category: &str,
        description: Option<&str>,
        created_by: &str,
    ) -> Result<ForumThread, Error> {
        let title = title.trim();
        let category = category.trim();
        if title.is_empty() {
            return Err(Error::Validation("Thread title must not be empty".into()));
        }
        if category.is_empty() {
            return Err(Error::Validation("Thread category must not be empty".into()));
        }

        let thread = ForumThread::new(title, category, description, created_by);
        self.forum_repo.create_thread(&thread).await?;
        info!("forum: thread {} created in '{}'", thread.forum_id, category);
        Ok(thread)
    }

    pub async fn get_thread(&self, forum_id: Uuid) -> Result<ForumThread, Error> {
        self.forum_repo
            .get_thread(forum_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No thread with id={}", forum_id)))
    }

    pub async fn list_threads(&self) -> Result<Vec<ForumThread>, Error> {
        self.forum_repo.list_threads().await
    }

    pub async fn delete_thread(&self, forum_id: Uuid) -> Result<(), Error> {
        self.forum_repo.delete_thread(forum_id).await
    }

    pub async fn add_comment(
        &self,
        forum_id: Uuid,
        body: &str,
        created_by: &str,
    ) -> Result<ForumComment, Error> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::Validation("Comment body must not be empty".into()));
        }

        // Surface a NotFound before the insert trips the foreign key.
        if self.forum_repo.get_thread(forum_id).await?.is_none() {
            return Err(Error::NotFound(format!("No thread with id={}", forum_id)));
        }

        let comment = ForumComment::new(forum_id, body, created_by);
        self.forum_repo.insert_comment(&comment).await?;
        info!("forum: comment {} added to thread {}", comment.comment_id, forum_id);
        Ok(comment)
    }

    pub async fn list_comments(&self, forum_id: Uuid) -> Result<Vec<ForumComment>, Error> {
        self.forum_repo.list_comments(forum_id).await
    }

    pub async fn toggle_thread_like(&self, forum_id: Uuid, user_id: Uuid) -> Result<bool, Error> {
        let liked = self
            .forum_repo
            .toggle_thread_like(forum_id, user_id, Utc::now())
            .await?;
        info!("forum: thread {} like by {} -> {}", forum_id, user_id, liked);
        Ok(liked)
    }

    pub async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, Error> {
        let liked = self
            .forum_repo
            .toggle_comment_like(comment_id, user_id, Utc::now())
            .await?;
        info!("forum: comment {} like by {} -> {}", comment_id, user_id, liked);
        Ok(liked)
    }
}
