use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime};

use crate::models::{Booking, BookingTerms, DashboardStats, Deliverable, SubscriptionProgress};

/// Position of a booking in the fixed review/approval/publication sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleStage {
    Confirmed,
    Submitted,
    RevisionRequested,
    Approved,
    Published,
    Completed,
}

impl LifecycleStage {
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim() {
            "Confirmed" => Some(LifecycleStage::Confirmed),
            "Submitted" | "Draft Submitted" => Some(LifecycleStage::Submitted),
            "Revision Requested" => Some(LifecycleStage::RevisionRequested),
            "Approved" => Some(LifecycleStage::Approved),
            "Published" => Some(LifecycleStage::Published),
            "Completed" => Some(LifecycleStage::Completed),
            _ => None,
        }
    }

    pub fn step(&self) -> u8 {
        match self {
            LifecycleStage::Confirmed => 0,
            LifecycleStage::Submitted => 1,
            LifecycleStage::RevisionRequested => 2,
            LifecycleStage::Approved => 3,
            LifecycleStage::Published => 4,
            LifecycleStage::Completed => 5,
        }
    }
}

/// Step index for a status label. Unrecognized labels map to step 0.
pub fn current_step(status: &str) -> u8 {
    LifecycleStage::from_status(status)
        .map(|stage| stage.step())
        .unwrap_or(0)
}

/// Step and whether the displayed status was recognized at all.
pub fn progress_step(booking: &Booking) -> (u8, bool) {
    let status = booking.display_status();
    match LifecycleStage::from_status(status) {
        Some(stage) => (stage.step(), true),
        None => {
            tracing::warn!(booking_id = %booking.id, status, "unrecognized booking status, showing step 0");
            (0, false)
        }
    }
}

pub fn subscription_progress(deliverables: &[Deliverable]) -> SubscriptionProgress {
    let (delivered, total) = deliverables.iter().fold((0u32, 0u32), |(d, t), item| {
        (
            d.saturating_add(item.submitted.min(item.quantity)),
            t.saturating_add(item.quantity),
        )
    });

    let percent = if total > 0 {
        (100.0 * f64::from(delivered) / f64::from(total)).round() as u32
    } else {
        0
    };

    SubscriptionProgress {
        delivered,
        total,
        percent,
    }
}

pub fn aggregate_stats(bookings: &[Booking]) -> DashboardStats {
    if bookings.is_empty() {
        return DashboardStats::default();
    }

    let total_spend = bookings.iter().map(booking_spend).sum();

    let active_count = bookings
        .iter()
        .filter(|b| !matches!(b.status.as_str(), "Completed" | "Canceled"))
        .count();

    let pending_review_count = bookings
        .iter()
        .filter(|b| {
            matches!(
                b.display_status(),
                "Submitted" | "Draft Submitted" | "Revision Requested"
            )
        })
        .count();

    let finished = bookings
        .iter()
        .filter(|b| matches!(b.status.as_str(), "Completed" | "Published"))
        .count();
    let completion_rate = (100.0 * finished as f64 / bookings.len() as f64).round() as u32;

    DashboardStats {
        total_spend,
        active_count,
        pending_review_count,
        completion_rate,
    }
}

fn booking_spend(booking: &Booking) -> f64 {
    match &booking.terms {
        BookingTerms::Subscription { .. } => parse_amount(&booking.cost),
        BookingTerms::OneOffPartnership { price, .. } => price.unwrap_or(0.0),
        BookingTerms::Sponsor { bid_amount } => bid_amount.unwrap_or(0.0),
        BookingTerms::CampaignInvite { .. } => 0.0,
    }
}

/// Reads the leading number out of a display string such as `"€1,250.50/month"`.
pub fn parse_amount(display: &str) -> f64 {
    let start = display
        .find(|c: char| c.is_ascii_digit() || c == '-' || c == '.')
        .unwrap_or(display.len());

    let number: String = display[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .filter(|c| *c != ',')
        .collect();

    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Most recently updated first; records without a usable timestamp go last.
pub fn sort_by_recent(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| match (recency_key(a), recency_key(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn recency_key(booking: &Booking) -> Option<NaiveDateTime> {
    booking
        .updated_at
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| booking.created_at.as_deref().and_then(parse_timestamp))
}

/// Accepts RFC 3339 and the backend's SQL-style timestamps; dates alone mean midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
