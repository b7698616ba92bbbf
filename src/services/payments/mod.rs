pub mod stripe;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Succeeded { payment_intent_id: String },
    Failed { message: String },
}

/// Server-side state of an intent, as seen when checking on it later.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentStatus {
    Succeeded,
    /// Still processing or waiting on the customer (e.g. card authentication).
    Pending,
    Failed { message: String },
}

/// Tokenized card payments: confirms a payment intent created by the backend.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: &str,
    ) -> Result<PaymentOutcome, AppError>;

    async fn retrieve_intent(
        &self,
        payment_intent_id: &str,
        client_secret: &str,
    ) -> Result<IntentStatus, AppError>;
}
