// campushub-server/src/state.rs

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use campushub_common::traits::repository_traits::{
    AppConfigRepository, EventRepository, FeedbackRepository, ForumRepository, GiftRepository,
    GiftVerificationRepository, StoreRepository, UserRepository,
};
use campushub_core::repositories::postgres::{
    PostgresAppConfigRepository, PostgresEventRepository, PostgresFeedbackRepository,
    PostgresForumRepository, PostgresGiftRepository, PostgresGiftVerificationRepository,
    PostgresStoreRepository, PostgresUserRepository,
};
use campushub_core::services::{FeedbackService, ForumService, GiftService};

/// Shared state for all routes. Services own the workflow logic;
/// the plain CRUD surfaces go straight to their repositories.
#[derive(Clone)]
pub struct AppState {
    pub gift_service: Arc<GiftService>,
    pub feedback_service: Arc<FeedbackService>,
    pub forum_service: Arc<ForumService>,
    pub user_repo: Arc<dyn UserRepository + Send + Sync>,
    pub gift_repo: Arc<dyn GiftRepository + Send + Sync>,
    pub event_repo: Arc<dyn EventRepository + Send + Sync>,
    pub store_repo: Arc<dyn StoreRepository + Send + Sync>,
    pub config_repo: Arc<dyn AppConfigRepository + Send + Sync>,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>) -> Self {
        let user_repo: Arc<dyn UserRepository + Send + Sync> =
            Arc::new(PostgresUserRepository::new(pool.clone()));
        let gift_repo: Arc<dyn GiftRepository + Send + Sync> =
            Arc::new(PostgresGiftRepository::new(pool.clone()));
        let verification_repo: Arc<dyn GiftVerificationRepository + Send + Sync> =
            Arc::new(PostgresGiftVerificationRepository::new(pool.clone()));
        let feedback_repo: Arc<dyn FeedbackRepository + Send + Sync> =
            Arc::new(PostgresFeedbackRepository::new(pool.clone()));
        let forum_repo: Arc<dyn ForumRepository + Send + Sync> =
            Arc::new(PostgresForumRepository::new(pool.clone()));
        let event_repo: Arc<dyn EventRepository + Send + Sync> =
            Arc::new(PostgresEventRepository::new(pool.clone()));
        let store_repo: Arc<dyn StoreRepository + Send + Sync> =
            Arc::new(PostgresStoreRepository::new(pool.clone()));
        let config_repo: Arc<dyn AppConfigRepository + Send + Sync> =
            Arc::new(PostgresAppConfigRepository::new(pool));

        Self {
            gift_service: Arc::new(GiftService::new(
                user_repo.clone(),
                gift_repo.clone(),
                verification_repo,
            )),
            feedback_service: Arc::new(FeedbackService::new(feedback_repo)),
            forum_service: Arc::new(ForumService::new(forum_repo)),
            user_repo,
            gift_repo,
            event_repo,
            store_repo,
            config_repo,
        }
    }
}
