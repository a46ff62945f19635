//! Mock SMS sender for development and testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use dl_core::domain::value_objects::Transport;
use dl_core::services::otp::{Delivery, NotificationSender, OtpMessage, SendFailure};
use dl_shared::utils::phone::mask_phone_number;

use super::sms_body;

/// Logging SMS sender
///
/// Replies with the same `{"code": ..}` payload shape as the real provider.
#[derive(Clone, Default)]
pub struct MockSmsSender {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
    last_codes: Arc<Mutex<HashMap<String, String>>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn last_code(&self, phone_number: &str) -> Option<String> {
        self.last_codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(phone_number)
            .cloned()
    }
}

#[async_trait]
impl NotificationSender for MockSmsSender {
    fn transport(&self) -> Transport {
        Transport::Sms
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn send_code(&self, message: &OtpMessage<'_>) -> Result<Delivery, SendFailure> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %mask_phone_number(message.identifier), "Mock SMS sender simulating failure");
            return Err(SendFailure::new("Failed to send SMS")
                .with_data(serde_json::json!({"code": "fail", "message": "simulated failure"})));
        }

        self.last_codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(message.identifier.to_string(), message.code.to_string());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        // Development only; real senders never log the code
        info!(
            event = "mock_sms_sent",
            to = %mask_phone_number(message.identifier),
            body = %sms_body(message),
            count,
            "Mock SMS delivered"
        );

        Ok(Delivery::new("SMS sent successfully")
            .with_data(serde_json::json!({"code": "ok", "message": "Successfully Send"})))
    }
}
