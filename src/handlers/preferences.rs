use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::check_auth;
use crate::errors::AppError;
use crate::models::Currency;
use crate::services::preferences::{set_user_currency, user_currency};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CurrencyResponse {
    code: &'static str,
    symbol: &'static str,
    name: &'static str,
}

impl From<Currency> for CurrencyResponse {
    fn from(c: Currency) -> Self {
        Self {
            code: c.code(),
            symbol: c.symbol(),
            name: c.name(),
        }
    }
}

// GET /api/preferences/currency
pub async fn get_currency(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CurrencyResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let currency = {
        let db = state.db.lock().unwrap();
        user_currency(&*db)
    };
    Ok(Json(currency.into()))
}

// POST /api/preferences/currency
#[derive(Deserialize)]
pub struct SetCurrencyRequest {
    pub code: String,
}

pub async fn set_currency(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SetCurrencyRequest>,
) -> Result<Json<CurrencyResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stored = {
        let db = state.db.lock().unwrap();
        set_user_currency(&*db, &body.code)
    };
    if !stored {
        return Err(AppError::Validation(format!(
            "unsupported currency: {}",
            body.code.trim()
        )));
    }

    // Display strings in the cached snapshot were rendered with the old currency.
    state.dashboard.lock().unwrap().take();

    let currency = Currency::parse(&body.code).unwrap_or_default();
    tracing::info!(currency = currency.code(), "currency preference updated");
    Ok(Json(currency.into()))
}
