use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::check_auth;
use crate::errors::AppError;
use crate::services::checkout::{pay_booking, resume_pending_payment, PaymentReceipt};
use crate::services::dashboard::refresh_dashboard;
use crate::state::AppState;

async fn respond_to_invite(
    state: &Arc<AppState>,
    invite_id: &str,
    accept: bool,
) -> Result<Json<serde_json::Value>, AppError> {
    state.api.respond_to_invite(invite_id, accept).await?;
    tracing::info!(invite_id, accept, "campaign invite answered");

    if let Err(e) = refresh_dashboard(state).await {
        tracing::warn!(error = %e, "dashboard refresh after invite response failed");
    }

    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/invites/:id/accept
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    respond_to_invite(&state, &id, true).await
}

// POST /api/invites/:id/reject
pub async fn reject_invite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    respond_to_invite(&state, &id, false).await
}

// POST /api/bookings/:id/pay
#[derive(Deserialize)]
pub struct PayRequest {
    pub payment_method: String,
}

pub async fn pay(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<PayRequest>,
) -> Result<Json<PaymentReceipt>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(pay_booking(&state, &id, &body.payment_method).await?))
}

// POST /api/payments/resume
#[derive(Serialize)]
pub struct ResumeResponse {
    resumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<PaymentReceipt>,
}

pub async fn resume_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ResumeResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let receipt = resume_pending_payment(&state).await?;
    Ok(Json(ResumeResponse {
        resumed: receipt.is_some(),
        receipt,
    }))
}
