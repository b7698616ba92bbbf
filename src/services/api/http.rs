use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};

use super::{extract_list, MarketplaceApi, PaymentIntent};
use crate::errors::AppError;
use crate::models::{BidDraft, Role};

pub struct HttpMarketplaceApi {
    base_url: String,
    session_cookie: String,
    client: reqwest::Client,
}

impl HttpMarketplaceApi {
    pub fn new(base_url: String, session_cookie: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_credentials(&self, req: RequestBuilder) -> RequestBuilder {
        if self.session_cookie.is_empty() {
            req
        } else {
            req.header(COOKIE, &self.session_cookie)
        }
    }

    async fn send(&self, req: RequestBuilder, what: &str) -> Result<Value, AppError> {
        let resp = self
            .with_credentials(req)
            .send()
            .await
            .map_err(|e| AppError::Api(format!("{what}: {e}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(what.to_string()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Api(format!("{what}: {e}")))?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            let message = body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            return Err(AppError::Api(format!("{what} ({status}): {message}")));
        }

        Ok(body)
    }

    async fn get_list(&self, path: &str) -> Result<Vec<Value>, AppError> {
        let body = self.send(self.client.get(self.url(path)), path).await?;
        Ok(extract_list(body))
    }
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn fetch_profile(&self) -> Result<Value, AppError> {
        self.send(self.client.get(self.url("/profile")), "fetch profile")
            .await
    }

    async fn fetch_bookings(&self, role: Role) -> Result<Vec<Value>, AppError> {
        let role = role.as_str();
        let mut records = self.get_list(&format!("/bookings/{role}")).await?;
        records.extend(self.get_list(&format!("/subscriptions/{role}")).await?);

        if role == Role::Creator.as_str() {
            let invites = self.get_list("/campaign-invites/creator").await?;
            records.extend(invites.into_iter().map(tag_invite));
        }

        tracing::debug!(count = records.len(), role, "fetched bookings");
        Ok(records)
    }

    async fn fetch_offers(&self) -> Result<Vec<Value>, AppError> {
        self.get_list("/creator-offers").await
    }

    async fn respond_to_invite(&self, invite_id: &str, accept: bool) -> Result<(), AppError> {
        let action = if accept { "accept" } else { "reject" };
        let path = format!("/campaign-invites/{invite_id}/{action}");
        self.send(self.client.post(self.url(&path)), "respond to invite")
            .await?;
        Ok(())
    }

    async fn submit_bid(&self, offer_id: &str, bid: &BidDraft) -> Result<(), AppError> {
        let path = format!("/creator-offers/{offer_id}/bids");
        let req = self.client.post(self.url(&path)).json(&json!({
            "bid_amount": bid.amount,
            "pitch": bid.pitch,
        }));
        self.send(req, "submit bid").await?;
        Ok(())
    }

    async fn create_payment_intent(&self, booking_id: &str) -> Result<PaymentIntent, AppError> {
        let req = self
            .client
            .post(self.url("/payments/create-intent"))
            .json(&json!({ "booking_id": booking_id }));
        let body = self.send(req, "create payment intent").await?;

        let client_secret = body
            .get("client_secret")
            .or_else(|| body.get("clientSecret"))
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::Api("missing client_secret in payment intent".to_string()))?
            .to_string();
        let payment_intent_id = body
            .get("payment_intent_id")
            .or_else(|| body.get("paymentIntentId"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| intent_id_from_secret(&client_secret).to_string());
        let subscription_id = body
            .get("subscription_id")
            .or_else(|| body.get("subscriptionId"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        Ok(PaymentIntent {
            client_secret,
            payment_intent_id,
            subscription_id,
        })
    }

    async fn complete_payment(
        &self,
        booking_id: Option<&str>,
        payment_intent_id: &str,
    ) -> Result<(), AppError> {
        let req = self.client.post(self.url("/payments/complete")).json(&json!({
            "booking_id": booking_id,
            "payment_intent_id": payment_intent_id,
        }));
        self.send(req, "complete payment").await?;
        Ok(())
    }
}

fn tag_invite(mut invite: Value) -> Value {
    if let Value::Object(map) = &mut invite {
        map.entry("type")
            .or_insert_with(|| Value::String("Campaign Invite".to_string()));
    }
    invite
}

/// Payment intent ids are the prefix of the client secret (`pi_x_secret_y`).
pub fn intent_id_from_secret(client_secret: &str) -> &str {
    client_secret
        .split_once("_secret_")
        .map(|(id, _)| id)
        .unwrap_or(client_secret)
}
