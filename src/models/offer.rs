use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A creator offer as shown on the listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub creator_name: String,
    pub description: String,
    pub platform: String,
    pub platforms: Vec<String>,
    pub topics: Vec<String>,
    pub price: Option<f64>,
    pub price_display: String,
    pub min_bid: Option<f64>,
    pub created_at: Option<String>,
}

/// A locally kept bid, keyed by offer id in the `userBids` preference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidDraft {
    pub amount: f64,
    pub pitch: String,
    pub timestamp: DateTime<Utc>,
}

/// Correlation ids for a card payment that has not been completed yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingPayment {
    pub payment_intent_id: String,
    pub subscription_id: Option<String>,
    /// Needed to look the intent up with the processor before completing it.
    pub client_secret: Option<String>,
}
