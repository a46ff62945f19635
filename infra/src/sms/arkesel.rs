//! Arkesel SMS sender
//!
//! Sends through the Arkesel HTTP API:
//! `GET {endpoint}?action=send-sms&api_key=..&to=..&from=..&sms=..`.
//! The provider answers with JSON; `code == "ok"` means accepted.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use dl_core::domain::value_objects::Transport;
use dl_core::services::otp::{Delivery, NotificationSender, OtpMessage, SendFailure};
use dl_shared::config::SmsConfig;
use dl_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use super::sms_body;
use crate::InfrastructureError;

/// Success code in the provider's JSON reply
const ACCEPTED_CODE: &str = "ok";

/// Arkesel-backed SMS sender
pub struct ArkeselSmsSender {
    client: Client,
    api_key: String,
    sender: String,
    endpoint: String,
}

impl std::fmt::Debug for ArkeselSmsSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArkeselSmsSender")
            .field("sender", &self.sender)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ArkeselSmsSender {
    /// Build the sender; fails when the API key is missing
    pub fn from_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("SMS_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(endpoint = %config.endpoint, sender = %config.sender, "Arkesel SMS sender configured");

        Ok(Self {
            client,
            api_key,
            sender: config.sender.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    /// Recipient in the form the provider expects: digits only, country code first when known
    pub fn recipient(phone: &str) -> Result<String, SendFailure> {
        let normalized = normalize_phone_number(phone);

        if normalized.starts_with('+') {
            let parsed = normalized.parse::<PhoneNumber>().map_err(|e| {
                warn!("Invalid phone number format: {}", e);
                SendFailure::new("Invalid phone number")
            })?;
            let e164 = parsed.format().mode(Mode::E164).to_string();
            return Ok(e164.trim_start_matches('+').to_string());
        }

        // Local numbers are passed through; the provider applies the account's country
        Ok(normalized)
    }

    fn interpret(body: Value) -> Result<Delivery, SendFailure> {
        if body.get("code").and_then(Value::as_str) == Some(ACCEPTED_CODE) {
            Ok(Delivery::new("SMS sent successfully").with_data(body))
        } else {
            Err(SendFailure::new("Failed to send SMS").with_data(body))
        }
    }
}

#[async_trait]
impl NotificationSender for ArkeselSmsSender {
    fn transport(&self) -> Transport {
        Transport::Sms
    }

    fn provider_name(&self) -> &str {
        "arkesel"
    }

    async fn send_code(&self, message: &OtpMessage<'_>) -> Result<Delivery, SendFailure> {
        let to = Self::recipient(message.identifier)?;
        let masked = mask_phone_number(&to);
        let body = sms_body(message);

        debug!(to = %masked, length = body.len(), "Sending OTP SMS via Arkesel");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "send-sms"),
                ("api_key", self.api_key.as_str()),
                ("to", to.as_str()),
                ("from", self.sender.as_str()),
                ("sms", body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(to = %masked, error = %e, "Arkesel request failed");
                SendFailure::new("Failed to send SMS")
                    .with_data(json!({"error": e.without_url().to_string()}))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            SendFailure::new("Failed to send SMS").with_data(json!({"error": e.to_string()}))
        })?;

        let payload = serde_json::from_str::<Value>(&text)
            .unwrap_or_else(|_| json!({"status": status.as_u16(), "body": text}));

        let result = Self::interpret(payload);
        match &result {
            Ok(_) => info!(to = %masked, "OTP SMS accepted by Arkesel"),
            Err(failure) => warn!(
                to = %masked,
                status = status.as_u16(),
                response = ?failure.data,
                "Arkesel rejected OTP SMS"
            ),
        }
        result
    }
}
