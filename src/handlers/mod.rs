pub mod bookings;
pub mod dashboard;
pub mod health;
pub mod offers;
pub mod preferences;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/profile", get(dashboard::get_profile))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/dashboard/refresh", post(dashboard::refresh))
        .route("/api/dashboard/events", get(dashboard::events_stream))
        .route(
            "/api/preferences/currency",
            get(preferences::get_currency).post(preferences::set_currency),
        )
        .route("/api/offers", get(offers::list_offers))
        .route(
            "/api/offers/saved",
            get(offers::list_saved).post(offers::save),
        )
        .route("/api/offers/saved/:id", delete(offers::unsave))
        .route("/api/offers/:id/bids", post(offers::place_bid))
        .route("/api/bids", get(offers::list_bids))
        .route("/api/bids/:id", delete(offers::discard_bid))
        .route("/api/invites/:id/accept", post(bookings::accept_invite))
        .route("/api/invites/:id/reject", post(bookings::reject_invite))
        .route("/api/bookings/:id/pay", post(bookings::pay))
        .route("/api/payments/resume", post(bookings::resume_payment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
