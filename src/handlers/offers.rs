use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::check_auth;
use crate::errors::AppError;
use crate::models::{BidDraft, Offer};
use crate::services::listing::{filter_offers, validate_bid, OfferFilter};
use crate::services::normalizer::normalize_offer;
use crate::services::preferences;
use crate::state::AppState;

// GET /api/offers
pub async fn list_offers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filter): Query<OfferFilter>,
) -> Result<Json<Vec<Offer>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let raw = state.api.fetch_offers().await?;

    let (currency, bids) = {
        let db = state.db.lock().unwrap();
        (preferences::user_currency(&*db), preferences::bid_drafts(&*db))
    };

    let offers = raw.iter().map(|o| normalize_offer(o, currency)).collect();
    Ok(Json(filter_offers(offers, &filter, &bids)))
}

// GET /api/offers/saved
pub async fn list_saved(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    Ok(Json(preferences::saved_offers(&*db)))
}

// POST /api/offers/saved
pub async fn save(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(offer): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if offer.get("id").map_or(true, |id| id.is_null()) {
        return Err(AppError::Validation("offer id is required".to_string()));
    }

    let db = state.db.lock().unwrap();
    preferences::save_offer(&*db, offer)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

// DELETE /api/offers/saved/:id
pub async fn unsave(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    if !preferences::remove_saved_offer(&*db, &id)? {
        return Err(AppError::NotFound(format!("saved offer {id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/bids
pub async fn list_bids(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BTreeMap<String, BidDraft>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    Ok(Json(preferences::bid_drafts(&*db)))
}

// POST /api/offers/:id/bids
#[derive(Deserialize)]
pub struct BidRequest {
    pub amount: f64,
    pub pitch: String,
    pub min_bid: Option<f64>,
}

pub async fn place_bid(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(offer_id): Path<String>,
    Json(body): Json<BidRequest>,
) -> Result<Json<BidDraft>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    validate_bid(body.amount, &body.pitch, body.min_bid)?;

    let draft = BidDraft {
        amount: body.amount,
        pitch: body.pitch.trim().to_string(),
        timestamp: Utc::now(),
    };

    // Keep the draft even if submission fails so the form can be retried.
    {
        let db = state.db.lock().unwrap();
        preferences::save_bid_draft(&*db, &offer_id, draft.clone())?;
    }

    state.api.submit_bid(&offer_id, &draft).await?;
    tracing::info!(offer_id = %offer_id, amount = draft.amount, "bid submitted");

    Ok(Json(draft))
}

// DELETE /api/bids/:id
pub async fn discard_bid(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(offer_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    if !preferences::remove_bid_draft(&*db, &offer_id)? {
        return Err(AppError::NotFound(format!("bid for offer {offer_id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}
