// campushub-server/src/routes/settings.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use campushub_common::error::Error;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(list_settings))
        .route(
            "/api/settings/{key}",
            get(get_setting).put(set_setting).delete(delete_setting),
        )
}

#[derive(Debug, Serialize)]
struct Setting {
    key: String,
    value: String,
}

async fn list_settings(State(state): State<AppState>) -> Result<Json<Vec<Setting>>, ApiError> {
    let entries = state.config_repo.list_all().await?;
    let settings = entries
        .into_iter()
        .map(|(key, value)| Setting { key, value })
        .collect();
    Ok(Json(settings))
}

async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Setting>, ApiError> {
    let value = state
        .config_repo
        .get_value(&key)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No setting '{}'", key)))?;
    Ok(Json(Setting { key, value }))
}

#[derive(Debug, Deserialize)]
struct SetSettingRequest {
    value: String,
}

async fn set_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetSettingRequest>,
) -> Result<StatusCode, ApiError> {
    state.config_repo.set_value(&key, &req.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.config_repo.delete_value(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
