// campushub-server/src/routes/claims.rs

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campushub_common::error::Error;
use campushub_common::models::{GiftVerification, User};
use campushub_core::services::ConfirmOutcome;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/claims", post(claim_gift))
        .route("/api/claims/{code}", get(lookup_claim))
        .route("/api/claims/{code}/confirm", post(confirm_claim))
}

#[derive(Debug, Deserialize)]
struct ClaimRequest {
    user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ClaimResponse {
    user: User,
    claim_code: String,
    newly_claimed: bool,
}

async fn claim_gift(
    State(state): State<AppState>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let outcome = state.gift_service.claim_gift(req.user_id).await?;
    Ok(Json(ClaimResponse {
        user: outcome.user,
        claim_code: outcome.claim_code,
        newly_claimed: outcome.newly_claimed,
    }))
}

#[derive(Debug, Serialize)]
struct LookupResponse {
    user: User,
    already_verified: bool,
}

async fn lookup_claim(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    let lookup = state
        .gift_service
        .lookup_claim(&code)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No claim with code '{}'", code.trim())))?;
    Ok(Json(LookupResponse {
        user: lookup.user,
        already_verified: lookup.already_verified,
    }))
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    user_id: Uuid,
    verified_by: String,
}

#[derive(Debug, Serialize)]
struct ConfirmResponse {
    already_verified: bool,
    verification: GiftVerification,
}

async fn confirm_claim(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    let outcome = state
        .gift_service
        .confirm_claim(req.user_id, &code, &req.verified_by)
        .await?;

    let resp = match outcome {
        ConfirmOutcome::Verified(v) => ConfirmResponse {
            already_verified: false,
            verification: v,
        },
        ConfirmOutcome::AlreadyVerified(v) => ConfirmResponse {
            already_verified: true,
            verification: v,
        },
    };
    Ok(Json(resp))
}
