//! Turns loosely-typed booking, subscription, invite and offer records from the
//! marketplace API into typed, display-ready values.
//!
//! The API is inconsistent about encodings: numbers show up as strings, list
//! fields as JSON strings (sometimes encoded twice), and optional fields are
//! simply absent. Nothing in here fails; bad input degrades to defaults.

use serde_json::Value;

use crate::models::currency::{format_price, json_number};
use crate::models::{Booking, BookingKind, BookingTerms, Currency, Deliverable, Offer, Role};

pub const AWAITING_ACCEPTANCE: &str = "Awaiting Creator Acceptance";

const DEFAULT_STATUS: &str = "Pending";
const DEFAULT_PAYMENT_STATUS: &str = "On Hold";
const DEFAULT_PLATFORM: &str = "N/A";
const DEFAULT_TITLE: &str = "Untitled Campaign";
const DEFAULT_COUNTERPART: &str = "Unknown";

pub fn normalize_booking(raw: &Value, role: Role, currency: Currency) -> Booking {
    let terms = resolve_terms(raw);
    let cost = display_cost(raw, &terms, currency);

    let platforms = parse_string_list(raw.get("platforms").unwrap_or(&Value::Null));
    let platform = text(raw, "platform")
        .or_else(|| platforms.first().cloned())
        .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

    Booking {
        id: id_string(raw.get("id")).unwrap_or_default(),
        terms,
        cost,
        status: text(raw, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        content_status: text(raw, "content_status"),
        payment_status: text(raw, "payment_status")
            .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
        title: first_text(raw, &["title", "campaign_name", "offer_title"])
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        counterpart: first_text(raw, &["counterpart", role.counterpart_field()])
            .unwrap_or_else(|| DEFAULT_COUNTERPART.to_string()),
        platform,
        platforms,
        audience_targets: parse_string_list(raw.get("audience_targets").unwrap_or(&Value::Null)),
        topics: parse_string_list(raw.get("topics").unwrap_or(&Value::Null)),
        deliverables: parse_deliverables(raw.get("deliverables").unwrap_or(&Value::Null)),
        description: text(raw, "description").unwrap_or_default(),
        message: text(raw, "message").unwrap_or_default(),
        start_date: text(raw, "start_date"),
        end_date: text(raw, "end_date"),
        created_at: text(raw, "created_at"),
        updated_at: text(raw, "updated_at"),
    }
}

pub fn normalize_offer(raw: &Value, currency: Currency) -> Offer {
    let platforms = parse_string_list(raw.get("platforms").unwrap_or(&Value::Null));
    let platform = text(raw, "platform")
        .or_else(|| platforms.first().cloned())
        .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());
    let price = number(raw, "price");

    Offer {
        id: id_string(raw.get("id")).unwrap_or_default(),
        title: first_text(raw, &["title", "offer_title"]).unwrap_or_else(|| "Untitled Offer".to_string()),
        creator_name: first_text(raw, &["creator_name", "username"])
            .unwrap_or_else(|| DEFAULT_COUNTERPART.to_string()),
        description: text(raw, "description").unwrap_or_default(),
        platform,
        platforms,
        topics: parse_string_list(raw.get("topics").unwrap_or(&Value::Null)),
        price,
        price_display: format_price(price, currency),
        min_bid: number(raw, "min_bid").or_else(|| number(raw, "minimum_bid")),
        created_at: text(raw, "created_at"),
    }
}

/// Picks the booking variant: an explicit known `type` wins, otherwise an
/// `offer_id` marks a one-off partnership and anything else is a sponsorship.
fn resolve_terms(raw: &Value) -> BookingTerms {
    let kind = text(raw, "type")
        .and_then(|t| BookingKind::parse(&t))
        .unwrap_or_else(|| {
            if raw.get("offer_id").is_some_and(|v| !v.is_null()) {
                BookingKind::OneOffPartnership
            } else {
                BookingKind::Sponsor
            }
        });

    match kind {
        BookingKind::Subscription => BookingTerms::Subscription {
            total_cost: number(raw, "total_cost"),
            duration_months: number(raw, "duration_months")
                .filter(|m| *m >= 1.0)
                .map(|m| m.round() as u32),
        },
        BookingKind::Sponsor => BookingTerms::Sponsor {
            bid_amount: number(raw, "bid_amount"),
        },
        BookingKind::OneOffPartnership => BookingTerms::OneOffPartnership {
            price: number(raw, "price"),
            offer_id: id_string(raw.get("offer_id")),
        },
        BookingKind::CampaignInvite => BookingTerms::CampaignInvite {
            bid_amount: number(raw, "bid_amount"),
            campaign_id: id_string(raw.get("campaign_id")),
        },
    }
}

fn display_cost(raw: &Value, terms: &BookingTerms, currency: Currency) -> String {
    match terms {
        BookingTerms::Subscription {
            total_cost: Some(total),
            duration_months: Some(months),
        } => format!("{}/month", format_price(Some(total / f64::from(*months)), currency)),
        BookingTerms::Subscription { .. } => text(raw, "cost").unwrap_or_default(),
        BookingTerms::OneOffPartnership { price, .. } => format_price(*price, currency),
        BookingTerms::Sponsor { bid_amount } | BookingTerms::CampaignInvite { bid_amount, .. } => {
            match bid_amount {
                Some(_) => format_price(*bid_amount, currency),
                None => AWAITING_ACCEPTANCE.to_string(),
            }
        }
    }
}

/// Parses a list field that may be a native array, a JSON-encoded string, or
/// a one-element array wrapping another encoded array (at any depth). Anything
/// else yields an empty list.
pub fn parse_string_list(value: &Value) -> Vec<String> {
    let parsed = match value {
        Value::Array(_) => value.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s.trim()) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let Value::Array(mut items) = parsed else {
        return Vec::new();
    };

    // Unwrap until the list no longer holds a single encoded array, so the
    // output never decodes further on a second pass.
    loop {
        let decoded = match items.as_slice() {
            [Value::String(inner)] if looks_like_array(inner) => {
                serde_json::from_str::<Value>(inner.trim())
            }
            _ => break,
        };
        match decoded {
            Ok(Value::Array(nested)) => items = nested,
            _ => return Vec::new(),
        }
    }

    collect_strings(&items)
}

fn looks_like_array(s: &str) -> bool {
    let s = s.trim();
    s.starts_with('[') && s.ends_with(']')
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn parse_deliverables(value: &Value) -> Vec<Deliverable> {
    let parsed = match value {
        Value::String(s) => serde_json::from_str::<Value>(s).unwrap_or(Value::Null),
        other => other.clone(),
    };

    let Value::Array(items) = parsed else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| Deliverable {
            platform: text(item, "platform"),
            content_type: first_text(item, &["content_type", "type"]),
            quantity: count(item, "quantity"),
            submitted: count(item, "submitted"),
        })
        .collect()
}

fn text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(raw, key))
}

fn number(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(json_number)
}

fn count(raw: &Value, key: &str) -> u32 {
    number(raw, key)
        .filter(|n| *n > 0.0)
        .map(|n| n.min(f64::from(u32::MAX)).round() as u32)
        .unwrap_or(0)
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
