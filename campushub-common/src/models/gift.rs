// File: campushub-common/src/models/gift.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A gift offered to members. Managed by the admin console; the claim
/// workflow only reads it for display.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gift {
    pub gift_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Gift {
    pub fn new(name: &str, description: &str, picture: Option<&str>) -> Self {
        Self {
            gift_id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            picture: picture.map(String::from),
            created_at: Utc::now(),
        }
    }
}

/// A single act of redemption: an operator marked a claim code as
/// collected. At most one row exists per claim code.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GiftVerification {
    pub verification_id: Uuid,
    pub user_id: Uuid,
    pub claim_code: String,
    pub verified_at: DateTime<Utc>,
    pub verified_by: String,
}

impl GiftVerification {
    pub fn new(user_id: Uuid, claim_code: &str, verified_by: &str) -> Self {
        Self {
            verification_id: Uuid::new_v4(),
            user_id,
            claim_code: claim_code.to_string(),
            verified_at: Utc::now(),
            verified_by: verified_by.to_string(),
        }
    }
}
