use async_trait::async_trait;
use serde_json::Value;

use super::{IntentStatus, PaymentOutcome, PaymentProcessor};
use crate::errors::AppError;
use crate::services::api::http::intent_id_from_secret;

pub struct StripeProcessor {
    publishable_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl StripeProcessor {
    pub fn new(publishable_key: String, api_url: String) -> Self {
        Self {
            publishable_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn require_key(&self) -> Result<(), AppError> {
        if self.publishable_key.is_empty() {
            return Err(AppError::Config(
                "STRIPE_PUBLISHABLE_KEY must be set to take payments".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: &str,
    ) -> Result<PaymentOutcome, AppError> {
        self.require_key()?;

        let intent_id = intent_id_from_secret(client_secret);
        let url = format!("{}/v1/payment_intents/{}/confirm", self.api_url, intent_id);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.publishable_key)
            .form(&[
                ("client_secret", client_secret),
                ("payment_method", payment_method),
            ])
            .send()
            .await?;

        let data: Value = resp.json().await?;
        Ok(outcome_from_response(&data, intent_id))
    }

    async fn retrieve_intent(
        &self,
        payment_intent_id: &str,
        client_secret: &str,
    ) -> Result<IntentStatus, AppError> {
        self.require_key()?;

        let url = format!("{}/v1/payment_intents/{}", self.api_url, payment_intent_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.publishable_key)
            .query(&[("client_secret", client_secret)])
            .send()
            .await?;

        let data: Value = resp.json().await?;
        if let Some(message) = data["error"]["message"].as_str() {
            return Err(AppError::Api(format!("payment intent lookup failed: {message}")));
        }
        Ok(intent_status(&data))
    }
}

fn intent_status(data: &Value) -> IntentStatus {
    match data["status"].as_str() {
        Some("succeeded") => IntentStatus::Succeeded,
        Some("requires_payment_method") => IntentStatus::Failed {
            message: data["last_payment_error"]["message"]
                .as_str()
                .unwrap_or("the payment method was declined")
                .to_string(),
        },
        Some("canceled") => IntentStatus::Failed {
            message: "the payment was canceled".to_string(),
        },
        _ => IntentStatus::Pending,
    }
}

fn outcome_from_response(data: &Value, intent_id: &str) -> PaymentOutcome {
    if let Some(message) = data["error"]["message"].as_str() {
        return PaymentOutcome::Failed {
            message: message.to_string(),
        };
    }

    match data["status"].as_str() {
        Some("succeeded") | Some("processing") => PaymentOutcome::Succeeded {
            payment_intent_id: data["id"].as_str().unwrap_or(intent_id).to_string(),
        },
        Some("requires_action") => PaymentOutcome::Failed {
            message: "additional authentication is required".to_string(),
        },
        Some(other) => PaymentOutcome::Failed {
            message: format!("payment not completed (status: {other})"),
        },
        None => PaymentOutcome::Failed {
            message: "unexpected response from payment processor".to_string(),
        },
    }
}
