use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::error::Error;
use crate::models::event::CampusEvent;
use crate::models::feedback::Feedback;
use crate::models::forum::{ForumComment, ForumThread};
use crate::models::gift::{Gift, GiftVerification};
use crate::models::store::PartnerStore;
use crate::models::user::User;

/// Outcome of attempting to write claim fields onto a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimWrite {
    /// The claim columns were set.
    Applied,
    /// The row was already claimed; nothing was written.
    AlreadyClaimed,
    /// Another user already holds this code; nothing was written.
    CodeTaken,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), Error>;
    async fn get(&self, user_id: Uuid) -> Result<Option<User>, Error>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error>;
    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<User>, Error>;

    /// Sets `has_claimed_gift`, `claim_code` and `claimed_at` in one
    /// conditional write that only touches an unclaimed row. Unique-code
    /// collisions are reported as `ClaimWrite::CodeTaken` rather than an
    /// error so the caller can regenerate.
    async fn assign_claim(
        &self,
        user_id: Uuid,
        claim_code: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<ClaimWrite, Error>;

    async fn update(&self, user: &User) -> Result<(), Error>;
    async fn delete(&self, user_id: Uuid) -> Result<(), Error>;
    async fn list_all(&self) -> Result<Vec<User>, Error>;
}

#[async_trait]
pub trait GiftRepository: Send + Sync {
    async fn create_gift(&self, gift: &Gift) -> Result<(), Error>;
    async fn get_gift(&self, gift_id: Uuid) -> Result<Option<Gift>, Error>;
    async fn list_gifts(&self) -> Result<Vec<Gift>, Error>;
    async fn update_gift(&self, gift: &Gift) -> Result<(), Error>;
    async fn delete_gift(&self, gift_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait GiftVerificationRepository: Send + Sync {
    /// Records a redemption only if no verification exists for the same
    /// claim code. Returns `true` if the row was inserted, `false` if the
    /// code was already verified. The check-and-insert is a single atomic
    /// operation keyed by the code, so concurrent confirms cannot both
    /// succeed.
    async fn insert_if_absent(&self, verification: &GiftVerification) -> Result<bool, Error>;

    async fn get_by_claim_code(&self, claim_code: &str) -> Result<Option<GiftVerification>, Error>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<GiftVerification>, Error>;
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn insert(&self, feedback: &Feedback) -> Result<(), Error>;
    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<Feedback>, Error>;
    async fn list_all(&self) -> Result<Vec<Feedback>, Error>;

    /// Returns `false` if no feedback with that id exists.
    async fn set_admin_response(&self, feedback_id: Uuid, response: &str) -> Result<bool, Error>;

    async fn delete(&self, feedback_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), Error>;
    async fn get_thread(&self, forum_id: Uuid) -> Result<Option<ForumThread>, Error>;
    async fn list_threads(&self) -> Result<Vec<ForumThread>, Error>;
    async fn delete_thread(&self, forum_id: Uuid) -> Result<(), Error>;

    /// Inserts the comment and bumps the thread's `comments_count` and
    /// `last_activity` in the same transaction.
    async fn insert_comment(&self, comment: &ForumComment) -> Result<(), Error>;
    async fn list_comments(&self, forum_id: Uuid) -> Result<Vec<ForumComment>, Error>;

    /// Flips the (thread, user) like membership and adjusts the counter
    /// by ±1. Returns the new liked state.
    async fn toggle_thread_like(
        &self,
        forum_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, Error>;

    /// Same as `toggle_thread_like`, for a comment.
    async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, Error>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, event: &CampusEvent) -> Result<(), Error>;
    async fn get_event(&self, event_id: Uuid) -> Result<Option<CampusEvent>, Error>;
    async fn list_events(&self) -> Result<Vec<CampusEvent>, Error>;
    async fn update_event(&self, event: &CampusEvent) -> Result<(), Error>;
    async fn delete_event(&self, event_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn create_store(&self, store: &PartnerStore) -> Result<(), Error>;
    async fn get_store(&self, store_id: Uuid) -> Result<Option<PartnerStore>, Error>;
    async fn list_stores(&self) -> Result<Vec<PartnerStore>, Error>;
    async fn update_store(&self, store: &PartnerStore) -> Result<(), Error>;
    async fn delete_store(&self, store_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait AppConfigRepository: Send + Sync {
    async fn set_value(&self, config_key: &str, config_value: &str) -> Result<(), Error>;
    async fn get_value(&self, config_key: &str) -> Result<Option<String>, Error>;
    async fn list_all(&self) -> Result<Vec<(String, String)>, Error>;
    async fn delete_value(&self, config_key: &str) -> Result<(), Error>;

    async fn get_wave_palette(&self) -> Result<Option<String>, Error> {
        self.get_value("wave_palette").await
    }
    async fn set_wave_palette(&self, json_str: &str) -> Result<(), Error> {
        self.set_value("wave_palette", json_str).await
    }
}
