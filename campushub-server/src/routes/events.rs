// campushub-server/src/routes/events.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use campushub_common::error::Error;
use campushub_common::models::CampusEvent;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{event_id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[derive(Debug, Deserialize)]
struct EventBody {
    title: String,
    description: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    registration_required: bool,
    picture: Option<String>,
    address: Option<String>,
    #[serde(default)]
    max_attendees: i32,
    current_attendees: Option<i32>,
    #[serde(default)]
    priority: i32,
    phone_number: Option<String>,
    category: Option<String>,
}

fn validate_event(body: &EventBody) -> Result<(), Error> {
    if body.title.trim().is_empty() {
        return Err(Error::Validation("Event title must not be empty".into()));
    }
    if let Some(end) = body.end_date {
        if end < body.start_date {
            return Err(Error::Validation("Event end date precedes its start".into()));
        }
    }
    Ok(())
}

async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<CampusEvent>>, ApiError> {
    Ok(Json(state.event_repo.list_events().await?))
}

async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<EventBody>,
) -> Result<(StatusCode, Json<CampusEvent>), ApiError> {
    validate_event(&body)?;
    let event = CampusEvent {
        event_id: Uuid::new_v4(),
        title: body.title,
        description: body.description,
        start_date: body.start_date,
        end_date: body.end_date,
        registration_required: body.registration_required,
        picture: body.picture,
        address: body.address,
        max_attendees: body.max_attendees,
        current_attendees: body.current_attendees.unwrap_or(0),
        priority: body.priority,
        phone_number: body.phone_number,
        category: body.category,
        created_at: Utc::now(),
    };
    state.event_repo.create_event(&event).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<CampusEvent>, ApiError> {
    let event = state
        .event_repo
        .get_event(event_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No event with id={}", event_id)))?;
    Ok(Json(event))
}

async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<EventBody>,
) -> Result<Json<CampusEvent>, ApiError> {
    validate_event(&body)?;
    let existing = state
        .event_repo
        .get_event(event_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No event with id={}", event_id)))?;

    let event = CampusEvent {
        event_id: existing.event_id,
        title: body.title,
        description: body.description,
        start_date: body.start_date,
        end_date: body.end_date,
        registration_required: body.registration_required,
        picture: body.picture,
        address: body.address,
        max_attendees: body.max_attendees,
        current_attendees: body.current_attendees.unwrap_or(existing.current_attendees),
        priority: body.priority,
        phone_number: body.phone_number,
        category: body.category,
        created_at: existing.created_at,
    };
    state.event_repo.update_event(&event).await?;
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.event_repo.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
