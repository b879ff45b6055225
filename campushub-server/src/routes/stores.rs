// campushub-server/src/routes/stores.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use campushub_common::error::Error;
use campushub_common::models::PartnerStore;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", get(list_stores).post(create_store))
        .route(
            "/api/stores/{store_id}",
            get(get_store).put(update_store).delete(delete_store),
        )
}

#[derive(Debug, Deserialize)]
struct StoreBody {
    name: String,
    picture: Option<String>,
    address: Option<String>,
    description: Option<String>,
    phone_number: Option<String>,
    category: Option<String>,
    discount: String,
}

fn validate_store(body: &StoreBody) -> Result<(), Error> {
    if body.name.trim().is_empty() {
        return Err(Error::Validation("Store name must not be empty".into()));
    }
    if body.discount.trim().is_empty() {
        return Err(Error::Validation("Store discount must not be empty".into()));
    }
    Ok(())
}

async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<PartnerStore>>, ApiError> {
    Ok(Json(state.store_repo.list_stores().await?))
}

async fn create_store(
    State(state): State<AppState>,
    Json(body): Json<StoreBody>,
) -> Result<(StatusCode, Json<PartnerStore>), ApiError> {
    validate_store(&body)?;
    let store = PartnerStore {
        store_id: Uuid::new_v4(),
        name: body.name,
        picture: body.picture,
        address: body.address,
        description: body.description,
        phone_number: body.phone_number,
        category: body.category,
        discount: body.discount,
        created_at: Utc::now(),
    };
    state.store_repo.create_store(&store).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<PartnerStore>, ApiError> {
    let store = state
        .store_repo
        .get_store(store_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No store with id={}", store_id)))?;
    Ok(Json(store))
}

async fn update_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(body): Json<StoreBody>,
) -> Result<Json<PartnerStore>, ApiError> {
    validate_store(&body)?;
    let existing = state
        .store_repo
        .get_store(store_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No store with id={}", store_id)))?;

    let store = PartnerStore {
        store_id: existing.store_id,
        name: body.name,
        picture: body.picture,
        address: body.address,
        description: body.description,
        phone_number: body.phone_number,
        category: body.category,
        discount: body.discount,
        created_at: existing.created_at,
    };
    state.store_repo.update_store(&store).await?;
    Ok(Json(store))
}

async fn delete_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store_repo.delete_store(store_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
