// campushub-server/src/routes/feedback.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campushub_common::models::Feedback;
use campushub_core::services::SubmitOutcome;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/feedback", get(list_feedback).post(submit_feedback))
        .route("/api/feedback/{feedback_id}", axum::routing::delete(delete_feedback))
        .route("/api/feedback/{feedback_id}/response", put(respond))
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    user_id: Uuid,
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SubmitResponse {
    Accepted { feedback: Feedback },
    Throttled { last_submitted_at: DateTime<Utc> },
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let outcome = state
        .feedback_service
        .submit(req.user_id, &req.content)
        .await?;

    let resp = match outcome {
        SubmitOutcome::Accepted(feedback) => SubmitResponse::Accepted { feedback },
        SubmitOutcome::Throttled { last_submitted_at } => {
            SubmitResponse::Throttled { last_submitted_at }
        }
    };
    Ok(Json(resp))
}

async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, ApiError> {
    Ok(Json(state.feedback_service.list_feedback().await?))
}

#[derive(Debug, Deserialize)]
struct RespondRequest {
    response: String,
}

async fn respond(
    State(state): State<AppState>,
    Path(feedback_id): Path<Uuid>,
    Json(req): Json<RespondRequest>,
) -> Result<StatusCode, ApiError> {
    state.feedback_service.respond(feedback_id, &req.response).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.feedback_service.delete(feedback_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
