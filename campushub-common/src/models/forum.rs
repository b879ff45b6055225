// File: campushub-common/src/models/forum.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A discussion thread. `likes` and `comments_count` are denormalized
/// counters; the repository adjusts them with store-side increments.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumThread {
    pub forum_id: Uuid,
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: String,
    pub is_active: bool,
    pub likes: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ForumThread {
    pub fn new(title: &str, category: &str, description: Option<&str>, created_by: &str) -> Self {
        let now = Utc::now();
        Self {
            forum_id: Uuid::new_v4(),
            title: title.to_string(),
            category: category.to_string(),
            description: description.map(String::from),
            created_by: created_by.to_string(),
            is_active: true,
            likes: 0,
            comments_count: 0,
            created_at: now,
            last_activity: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumComment {
    pub comment_id: Uuid,
    pub forum_id: Uuid,
    pub body: String,
    pub created_by: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl ForumComment {
    pub fn new(forum_id: Uuid, body: &str, created_by: &str) -> Self {
        Self {
            comment_id: Uuid::new_v4(),
            forum_id,
            body: body.to_string(),
            created_by: created_by.to_string(),
            likes: 0,
            created_at: Utc::now(),
        }
    }
}
