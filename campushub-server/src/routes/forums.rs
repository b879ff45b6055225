// campushub-server/src/routes/forums.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campushub_common::models::{ForumComment, ForumThread};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/forums", get(list_threads).post(create_thread))
        .route("/api/forums/{forum_id}", get(get_thread).delete(delete_thread))
        .route(
            "/api/forums/{forum_id}/comments",
            get(list_comments).post(add_comment),
        )
        .route("/api/forums/{forum_id}/like", post(toggle_thread_like))
        .route(
            "/api/forums/{forum_id}/comments/{comment_id}/like",
            post(toggle_comment_like),
        )
}

async fn list_threads(State(state): State<AppState>) -> Result<Json<Vec<ForumThread>>, ApiError> {
    Ok(Json(state.forum_service.list_threads().await?))
}

#[derive(Debug, Deserialize)]
struct CreateThreadRequest {
    title: String,
    category: String,
    description: Option<String>,
    created_by: String,
}

async fn create_thread(
    State(state): State<AppState>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<ForumThread>), ApiError> {
    let thread = state
        .forum_service
        .create_thread(
            &req.title,
            &req.category,
            req.description.as_deref(),
            &req.created_by,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

async fn get_thread(
    State(state): State<AppState>,
    Path(forum_id): Path<Uuid>,
) -> Result<Json<ForumThread>, ApiError> {
    Ok(Json(state.forum_service.get_thread(forum_id).await?))
}

async fn delete_thread(
    State(state): State<AppState>,
    Path(forum_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.forum_service.delete_thread(forum_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct AddCommentRequest {
    body: String,
    created_by: String,
}

async fn add_comment(
    State(state): State<AppState>,
    Path(forum_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<ForumComment>), ApiError> {
    let comment = state
        .forum_service
        .add_comment(forum_id, &req.body, &req.created_by)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(forum_id): Path<Uuid>,
) -> Result<Json<Vec<ForumComment>>, ApiError> {
    Ok(Json(state.forum_service.list_comments(forum_id).await?))
}

#[derive(Debug, Deserialize)]
struct LikeRequest {
    user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct LikeResponse {
    liked: bool,
}

async fn toggle_thread_like(
    State(state): State<AppState>,
    Path(forum_id): Path<Uuid>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, ApiError> {
    let liked = state
        .forum_service
        .toggle_thread_like(forum_id, req.user_id)
        .await?;
    Ok(Json(LikeResponse { liked }))
}

async fn toggle_comment_like(
    State(state): State<AppState>,
    Path((_forum_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, ApiError> {
    let liked = state
        .forum_service
        .toggle_comment_like(comment_id, req.user_id)
        .await?;
    Ok(Json(LikeResponse { liked }))
}
