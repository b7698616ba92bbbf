pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{BidDraft, Role};

/// Result of asking the backend to start a card payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
}

/// The marketplace REST backend. Records come back as raw JSON; normalizing
/// them is the caller's job.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn fetch_profile(&self) -> Result<Value, AppError>;

    async fn fetch_bookings(&self, role: Role) -> Result<Vec<Value>, AppError>;

    async fn fetch_offers(&self) -> Result<Vec<Value>, AppError>;

    async fn respond_to_invite(&self, invite_id: &str, accept: bool) -> Result<(), AppError>;

    async fn submit_bid(&self, offer_id: &str, bid: &BidDraft) -> Result<(), AppError>;

    async fn create_payment_intent(&self, booking_id: &str) -> Result<PaymentIntent, AppError>;

    async fn complete_payment(
        &self,
        booking_id: Option<&str>,
        payment_intent_id: &str,
    ) -> Result<(), AppError>;
}

/// Pulls the record list out of a list response, which is either a bare
/// array or an object wrapping one.
pub fn extract_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "bookings", "subscriptions", "invites", "offers"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
