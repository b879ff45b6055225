use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An enrolled member of the association, created during bulk import.
///
/// Invariant: `claim_code` and `claimed_at` are set if and only if
/// `has_claimed_gift` is true (also a CHECK constraint in the schema).
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub has_claimed_gift: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(first_name: &str, last_name: &str, email: Option<&str>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.map(String::from),
            phone_number: None,
            is_active: true,
            created_at: Utc::now(),
            has_claimed_gift: false,
            claim_code: None,
            claimed_at: None,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
