use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::db::queries;
use crate::models::{BidDraft, Currency, PendingPayment};

pub const USER_CURRENCY: &str = "userCurrency";
pub const SAVED_OFFERS: &str = "savedOffers";
pub const USER_BIDS: &str = "userBids";
pub const PENDING_SUBSCRIPTION_ID: &str = "pendingSubscriptionId";
pub const PENDING_PAYMENT_INTENT_ID: &str = "pendingPaymentIntentId";
pub const PENDING_CLIENT_SECRET: &str = "pendingPaymentClientSecret";

/// Local key-value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

impl PreferenceStore for Connection {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        queries::get_preference(self, key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        queries::set_preference(self, key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        queries::delete_preference(self, key).map(|_| ())
    }
}

// ── Currency ──

pub fn user_currency(store: &dyn PreferenceStore) -> Currency {
    match store.get(USER_CURRENCY) {
        Ok(Some(code)) => Currency::parse(&code).unwrap_or_else(|| {
            tracing::debug!(code = %code, "stored currency is not supported, using EUR");
            Currency::default()
        }),
        Ok(None) => Currency::default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read currency preference");
            Currency::default()
        }
    }
}

/// Persists `code` when it is a supported currency. Returns whether it was stored.
pub fn set_user_currency(store: &dyn PreferenceStore, code: &str) -> bool {
    let Some(currency) = Currency::parse(code) else {
        return false;
    };

    match store.set(USER_CURRENCY, currency.code()) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to store currency preference");
            false
        }
    }
}

// ── Saved offers ──

pub fn saved_offers(store: &dyn PreferenceStore) -> Vec<serde_json::Value> {
    read_json(store, SAVED_OFFERS)
}

/// Saves an offer, replacing an existing entry with the same id.
pub fn save_offer(store: &dyn PreferenceStore, offer: serde_json::Value) -> anyhow::Result<()> {
    let id = offer_id(&offer);
    let mut offers = saved_offers(store);
    offers.retain(|o| id.is_none() || offer_id(o) != id);
    offers.push(offer);
    store.set(SAVED_OFFERS, &serde_json::to_string(&offers)?)
}

pub fn remove_saved_offer(store: &dyn PreferenceStore, id: &str) -> anyhow::Result<bool> {
    let mut offers = saved_offers(store);
    let before = offers.len();
    offers.retain(|o| offer_id(o).as_deref() != Some(id));
    if offers.len() == before {
        return Ok(false);
    }
    store.set(SAVED_OFFERS, &serde_json::to_string(&offers)?)?;
    Ok(true)
}

fn offer_id(offer: &serde_json::Value) -> Option<String> {
    match offer.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ── Bid drafts ──

pub fn bid_drafts(store: &dyn PreferenceStore) -> BTreeMap<String, BidDraft> {
    read_json(store, USER_BIDS)
}

pub fn save_bid_draft(
    store: &dyn PreferenceStore,
    offer_id: &str,
    draft: BidDraft,
) -> anyhow::Result<()> {
    let mut bids = bid_drafts(store);
    bids.insert(offer_id.to_string(), draft);
    store.set(USER_BIDS, &serde_json::to_string(&bids)?)
}

pub fn remove_bid_draft(store: &dyn PreferenceStore, offer_id: &str) -> anyhow::Result<bool> {
    let mut bids = bid_drafts(store);
    if bids.remove(offer_id).is_none() {
        return Ok(false);
    }
    store.set(USER_BIDS, &serde_json::to_string(&bids)?)?;
    Ok(true)
}

// ── Pending payment ──

pub fn pending_payment(store: &dyn PreferenceStore) -> Option<PendingPayment> {
    let payment_intent_id = store
        .get(PENDING_PAYMENT_INTENT_ID)
        .ok()
        .flatten()
        .filter(|v| !v.is_empty())?;
    let optional = |key: &str| store.get(key).ok().flatten().filter(|v| !v.is_empty());

    Some(PendingPayment {
        payment_intent_id,
        subscription_id: optional(PENDING_SUBSCRIPTION_ID),
        client_secret: optional(PENDING_CLIENT_SECRET),
    })
}

pub fn set_pending_payment(
    store: &dyn PreferenceStore,
    pending: &PendingPayment,
) -> anyhow::Result<()> {
    store.set(PENDING_PAYMENT_INTENT_ID, &pending.payment_intent_id)?;
    for (key, value) in [
        (PENDING_SUBSCRIPTION_ID, &pending.subscription_id),
        (PENDING_CLIENT_SECRET, &pending.client_secret),
    ] {
        match value {
            Some(v) => store.set(key, v)?,
            None => store.remove(key)?,
        }
    }
    Ok(())
}

pub fn clear_pending_payment(store: &dyn PreferenceStore) -> anyhow::Result<()> {
    store.remove(PENDING_PAYMENT_INTENT_ID)?;
    store.remove(PENDING_SUBSCRIPTION_ID)?;
    store.remove(PENDING_CLIENT_SECRET)
}

/// Reads a JSON-encoded preference, falling back to the empty value when it
/// is missing or malformed.
fn read_json<T: DeserializeOwned + Default>(store: &dyn PreferenceStore, key: &str) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(error = %e, key, "failed to read preference");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, key, "discarding malformed preference");
        T::default()
    })
}
