// File: campushub-common/src/models/feedback.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    pub feedback_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(user_id: Uuid, content: &str) -> Self {
        Self {
            feedback_id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            admin_response: None,
            created_at: Utc::now(),
        }
    }
}
