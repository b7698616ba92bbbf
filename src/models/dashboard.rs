use serde::Serialize;
use uuid::Uuid;

use super::{Booking, Currency, Role};

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct SubscriptionProgress {
    pub delivered: u32,
    pub total: u32,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    /// Spend for brands, earnings for creators.
    pub total_spend: f64,
    pub active_count: usize,
    pub pending_review_count: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingCard {
    #[serde(flatten)]
    pub booking: Booking,
    pub step: u8,
    pub stage_known: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<SubscriptionProgress>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSnapshot {
    pub session_id: Uuid,
    pub role: Role,
    pub currency: Currency,
    pub bookings: Vec<BookingCard>,
    pub stats: DashboardStats,
    pub fetched_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DashboardEvent {
    Snapshot(DashboardSnapshot),
    Error { kind: String, message: String },
}
