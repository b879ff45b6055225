// campushub-server/src/routes/gifts.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use campushub_common::error::Error;
use campushub_common::models::Gift;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/gifts", get(list_gifts).post(create_gift))
        .route("/api/gifts/available", get(available_gift))
        .route("/api/gifts/{gift_id}", get(get_gift).delete(delete_gift))
}

async fn list_gifts(State(state): State<AppState>) -> Result<Json<Vec<Gift>>, ApiError> {
    Ok(Json(state.gift_repo.list_gifts().await?))
}

/// The gift currently offered on the claim screen, if any.
async fn available_gift(State(state): State<AppState>) -> Result<Json<Option<Gift>>, ApiError> {
    Ok(Json(state.gift_service.available_gift().await?))
}

#[derive(Debug, Deserialize)]
struct CreateGiftRequest {
    name: String,
    description: String,
    picture: Option<String>,
}

async fn create_gift(
    State(state): State<AppState>,
    Json(req): Json<CreateGiftRequest>,
) -> Result<(StatusCode, Json<Gift>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(Error::Validation("Gift name must not be empty".into()).into());
    }
    let gift = Gift::new(&req.name, &req.description, req.picture.as_deref());
    state.gift_repo.create_gift(&gift).await?;
    Ok((StatusCode::CREATED, Json(gift)))
}

async fn get_gift(
    State(state): State<AppState>,
    Path(gift_id): Path<Uuid>,
) -> Result<Json<Gift>, ApiError> {
    let gift = state
        .gift_repo
        .get_gift(gift_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No gift with id={}", gift_id)))?;
    Ok(Json(gift))
}

async fn delete_gift(
    State(state): State<AppState>,
    Path(gift_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.gift_repo.delete_gift(gift_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
