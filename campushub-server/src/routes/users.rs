// campushub-server/src/routes/users.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use campushub_common::error::Error;
use campushub_common::models::User;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{user_id}", get(get_user).delete(delete_user))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.user_repo.list_all().await?))
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone_number: Option<String>,
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(Error::Validation("User name must not be empty".into()).into());
    }
    let mut user = User::new(&req.first_name, &req.last_name, req.email.as_deref());
    user.phone_number = req.phone_number;
    state.user_repo.create(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .user_repo
        .get(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No user with id={}", user_id)))?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_repo.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
