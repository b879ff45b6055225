// src/repositories/mod.rs

pub mod postgres;

pub use postgres::{
    PostgresAppConfigRepository, PostgresEventRepository, PostgresFeedbackRepository,
    PostgresForumRepository, PostgresGiftRepository, PostgresGiftVerificationRepository,
    PostgresStoreRepository, PostgresUserRepository,
};
