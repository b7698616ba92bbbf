use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::PendingPayment;
use crate::services::dashboard::refresh_dashboard;
use crate::services::payments::{IntentStatus, PaymentOutcome};
use crate::services::preferences::{clear_pending_payment, pending_payment, set_pending_payment};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentReceipt {
    pub booking_id: Option<String>,
    pub payment_intent_id: String,
}

/// Pays a booking by card: the backend creates the intent, the processor
/// confirms it, and the backend is told once the processor reports success.
pub async fn pay_booking(
    state: &Arc<AppState>,
    booking_id: &str,
    payment_method: &str,
) -> Result<PaymentReceipt, AppError> {
    if payment_method.trim().is_empty() {
        return Err(AppError::Validation("payment method is required".to_string()));
    }

    let intent = state.api.create_payment_intent(booking_id).await?;

    {
        let db = state.db.lock().unwrap();
        set_pending_payment(
            &*db,
            &PendingPayment {
                payment_intent_id: intent.payment_intent_id.clone(),
                subscription_id: intent.subscription_id.clone(),
                client_secret: Some(intent.client_secret.clone()),
            },
        )
        .context("failed to record pending payment")?;
    }

    let outcome = state
        .payments
        .confirm_card_payment(&intent.client_secret, payment_method)
        .await?;

    let payment_intent_id = match outcome {
        PaymentOutcome::Succeeded { payment_intent_id } => payment_intent_id,
        PaymentOutcome::Failed { message } => {
            tracing::warn!(booking_id, error = %message, "card payment failed");
            return Err(AppError::Payment(message));
        }
    };

    state
        .api
        .complete_payment(Some(booking_id), &payment_intent_id)
        .await?;

    forget_pending(state);
    tracing::info!(booking_id, payment_intent_id = %payment_intent_id, "payment completed");

    if let Err(e) = refresh_dashboard(state).await {
        tracing::warn!(error = %e, "dashboard refresh after payment failed");
    }

    Ok(PaymentReceipt {
        booking_id: Some(booking_id.to_string()),
        payment_intent_id,
    })
}

/// Completes a payment whose confirmation happened out of band, e.g. after a
/// redirect back from the processor. The intent is looked up first and only
/// a succeeded one is reported to the backend. Returns `None` when nothing is
/// pending or the intent is still in progress.
pub async fn resume_pending_payment(
    state: &Arc<AppState>,
) -> Result<Option<PaymentReceipt>, AppError> {
    let pending = {
        let db = state.db.lock().unwrap();
        pending_payment(&*db)
    };
    let Some(pending) = pending else {
        return Ok(None);
    };

    let Some(client_secret) = pending.client_secret.as_deref() else {
        tracing::warn!(
            payment_intent_id = %pending.payment_intent_id,
            "pending payment cannot be verified, discarding it"
        );
        forget_pending(state);
        return Ok(None);
    };

    let status = state
        .payments
        .retrieve_intent(&pending.payment_intent_id, client_secret)
        .await?;

    match status {
        IntentStatus::Succeeded => {}
        IntentStatus::Pending => {
            tracing::info!(
                payment_intent_id = %pending.payment_intent_id,
                "pending payment still in progress"
            );
            return Ok(None);
        }
        IntentStatus::Failed { message } => {
            tracing::warn!(
                payment_intent_id = %pending.payment_intent_id,
                error = %message,
                "pending payment did not succeed, discarding it"
            );
            forget_pending(state);
            return Err(AppError::Payment(message));
        }
    }

    tracing::info!(
        payment_intent_id = %pending.payment_intent_id,
        subscription_id = ?pending.subscription_id,
        "resuming pending payment"
    );

    state
        .api
        .complete_payment(None, &pending.payment_intent_id)
        .await?;
    forget_pending(state);

    if let Err(e) = refresh_dashboard(state).await {
        tracing::warn!(error = %e, "dashboard refresh after payment failed");
    }

    Ok(Some(PaymentReceipt {
        booking_id: None,
        payment_intent_id: pending.payment_intent_id,
    }))
}

fn forget_pending(state: &AppState) {
    let db = state.db.lock().unwrap();
    if let Err(e) = clear_pending_payment(&*db) {
        tracing::warn!(error = %e, "failed to clear pending payment");
    }
}
