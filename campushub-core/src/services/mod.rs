// src/services/mod.rs

pub mod feedback_service;
pub mod forum_service;
pub mod gift_service;

pub use feedback_service::{FeedbackService, SubmitOutcome};
pub use forum_service::ForumService;
pub use gift_service::{ClaimLookup, ClaimOutcome, ConfirmOutcome, GiftService};
