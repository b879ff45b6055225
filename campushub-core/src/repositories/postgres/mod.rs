// src/repositories/postgres/mod.rs

pub mod app_config;
pub mod events;
pub mod feedback;
pub mod forums;
pub mod gift_verifications;
pub mod gifts;
pub mod stores;
pub mod user;

pub use app_config::PostgresAppConfigRepository;
pub use events::PostgresEventRepository;
pub use feedback::PostgresFeedbackRepository;
pub use forums::PostgresForumRepository;
pub use gift_verifications::PostgresGiftVerificationRepository;
pub use gifts::PostgresGiftRepository;
pub use stores::PostgresStoreRepository;
pub use user::PostgresUserRepository;
