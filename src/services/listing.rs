use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{BidDraft, Offer};
use crate::services::lifecycle::parse_timestamp;

pub const MAX_PITCH_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BidFilter {
    #[default]
    Any,
    WithBid,
    WithoutBid,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferFilter {
    pub search: Option<String>,
    pub platform: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub bids: BidFilter,
    #[serde(default)]
    pub sort: OfferSort,
}

pub fn filter_offers(
    offers: Vec<Offer>,
    filter: &OfferFilter,
    bids: &BTreeMap<String, BidDraft>,
) -> Vec<Offer> {
    let search = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let platform = filter
        .platform
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty() && p != "all");

    let mut matched: Vec<Offer> = offers
        .into_iter()
        .filter(|offer| match &search {
            Some(q) => matches_search(offer, q),
            None => true,
        })
        .filter(|offer| match &platform {
            Some(p) => {
                offer.platform.to_lowercase() == *p
                    || offer.platforms.iter().any(|x| x.to_lowercase() == *p)
            }
            None => true,
        })
        .filter(|offer| within_price(offer.price, filter.min_price, filter.max_price))
        .filter(|offer| match filter.bids {
            BidFilter::Any => true,
            BidFilter::WithBid => bids.contains_key(&offer.id),
            BidFilter::WithoutBid => !bids.contains_key(&offer.id),
        })
        .collect();

    match filter.sort {
        OfferSort::Newest => matched.sort_by(|a, b| match (created(a), created(b)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        OfferSort::PriceAsc => matched.sort_by(|a, b| price_key(a, 1.0).total_cmp(&price_key(b, 1.0))),
        OfferSort::PriceDesc => {
            matched.sort_by(|a, b| price_key(a, -1.0).total_cmp(&price_key(b, -1.0)))
        }
    }

    matched
}

fn created(offer: &Offer) -> Option<NaiveDateTime> {
    offer.created_at.as_deref().and_then(parse_timestamp)
}

fn matches_search(offer: &Offer, query: &str) -> bool {
    offer.title.to_lowercase().contains(query)
        || offer.creator_name.to_lowercase().contains(query)
        || offer.description.to_lowercase().contains(query)
        || offer.topics.iter().any(|t| t.to_lowercase().contains(query))
}

fn within_price(price: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(price) = price else {
        return false;
    };
    min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
}

// Offers without a price sort after priced ones in both directions.
fn price_key(offer: &Offer, direction: f64) -> f64 {
    offer.price.map(|p| p * direction).unwrap_or(f64::NAN)
}

/// Checks a bid before anything is sent to the marketplace.
pub fn validate_bid(amount: f64, pitch: &str, minimum: Option<f64>) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(
            "bid amount must be greater than zero".to_string(),
        ));
    }
    if let Some(min) = minimum.filter(|m| amount < *m) {
        return Err(AppError::Validation(format!(
            "bid amount must be at least {min}"
        )));
    }
    if pitch.trim().is_empty() {
        return Err(AppError::Validation("pitch is required".to_string()));
    }
    if pitch.chars().count() > MAX_PITCH_CHARS {
        return Err(AppError::Validation(format!(
            "pitch must be at most {MAX_PITCH_CHARS} characters"
        )));
    }
    Ok(())
}
