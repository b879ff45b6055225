// src/services/feedback_service.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use campushub_common::models::Feedback;
use campushub_common::traits::repository_traits::FeedbackRepository;
use crate::Error;

/// Minimum gap between two submissions from the same user.
const FEEDBACK_COOLDOWN_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Accepted(Feedback),
    /// The user submitted within the cooldown window; carries the time
    /// of their last submission.
    Throttled {
        last_submitted_at: chrono::DateTime<Utc>,
    },
}

pub struct FeedbackService {
    feedback_repo: Arc<dyn FeedbackRepository + Send + Sync>,
}

impl FeedbackService {
    pub fn new(feedback_repo: Arc<dyn FeedbackRepository + Send + Sync>) -> Self {
        Self { feedback_repo }
    }

    pub async fn submit(&self, user_id: Uuid, content: &str) -> Result<SubmitOutcome, Error> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::Validation("Feedback content must not be empty".into()));
        }

        if let Some(latest) = self.feedback_repo.latest_for_user(user_id).await? {
            let age = Utc::now() - latest.created_at;
            if age < Duration::days(FEEDBACK_COOLDOWN_DAYS) {
                info!(
                    "feedback: user={} throttled (last submission {})",
                    user_id, latest.created_at
                );
                return Ok(SubmitOutcome::Throttled {
                    last_submitted_at: latest.created_at,
                });
            }
        }

        let feedback = Feedback::new(user_id, content);
        self.feedback_repo.insert(&feedback).await?;
        info!("feedback: user={} submitted feedback {}", user_id, feedback.feedback_id);
        Ok(SubmitOutcome::Accepted(feedback))
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, Error> {
        self.feedback_repo.list_all().await
    }

    pub async fn respond(&self, feedback_id: Uuid, response: &str) -> Result<(), Error> {
        let response = response.trim();
        if response.is_empty() {
            return Err(Error::Validation("Response must not be empty".into()));
        }

        let updated = self
            .feedback_repo
            .set_admin_response(feedback_id, response)
            .await?;
        if !updated {
            return Err(Error::NotFound(format!("No feedback with id={}", feedback_id)));
        }
        Ok(())
    }

    pub async fn delete(&self, feedback_id: Uuid) -> Result<(), Error> {
        self.feedback_repo.delete(feedback_id).await
    }
}
