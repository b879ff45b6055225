// File: campushub-common/src/models/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An association event shown in the app's event listings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CampusEvent {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub registration_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub max_attendees: i32,
    pub current_attendees: i32,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}
