//! Mock email sender for development and testing
//!
//! Logs the rendered message instead of delivering it and remembers the last
//! code per recipient.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use dl_core::domain::value_objects::Transport;
use dl_core::services::otp::{Delivery, NotificationSender, OtpMessage, SendFailure};
use dl_shared::utils::email::mask_email;

use super::template::EmailContent;

/// Logging email sender
#[derive(Clone, Default)]
pub struct MockEmailSender {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
    last_codes: Arc<Mutex<HashMap<String, String>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages accepted so far
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Make every following send fail (or succeed again)
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Last code sent to `recipient`
    pub fn last_code(&self, recipient: &str) -> Option<String> {
        self.last_codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(recipient)
            .cloned()
    }
}

#[async_trait]
impl NotificationSender for MockEmailSender {
    fn transport(&self) -> Transport {
        Transport::Email
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn send_code(&self, message: &OtpMessage<'_>) -> Result<Delivery, SendFailure> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %mask_email(message.identifier), "Mock email sender simulating failure");
            return Err(SendFailure::new("Failed to send email")
                .with_data(serde_json::json!({"error": "simulated failure"})));
        }

        let content = EmailContent::render(message);
        self.last_codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(message.identifier.to_string(), message.code.to_string());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("<mock-{}@localhost>", Uuid::new_v4());

        // Development only; real senders never log the code
        info!(
            event = "mock_email_sent",
            to = %mask_email(message.identifier),
            subject = %content.subject,
            body = %content.text,
            count,
            "Mock email delivered"
        );

        Ok(Delivery::new("Email sent successfully")
            .with_data(serde_json::json!({"messageId": message_id})))
    }
}
