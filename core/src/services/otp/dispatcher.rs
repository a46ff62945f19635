//! Notification dispatcher
//!
//! Routes a code to the sender registered for the requested transport and
//! turns every failure into a [`DispatchResult`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dl_shared::identifier::mask_identifier;

use crate::domain::value_objects::Transport;

use super::traits::NotificationSender;
use super::types::{DispatchResult, OtpMessage};

/// Default upper bound on one send
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One sender per transport, each send bounded by a timeout
#[derive(Clone)]
pub struct NotificationDispatcher {
    senders: HashMap<Transport, Arc<dyn NotificationSender>>,
    timeout: Duration,
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DISPATCH_TIMEOUT)
    }
}

impl NotificationDispatcher {
    /// Create a dispatcher with no senders
    pub fn new(timeout: Duration) -> Self {
        Self {
            senders: HashMap::new(),
            timeout,
        }
    }

    /// Register `sender` for its transport, replacing any previous one
    pub fn with_sender(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.register(sender);
        self
    }

    pub fn register(&mut self, sender: Arc<dyn NotificationSender>) {
        self.senders.insert(sender.transport(), sender);
    }

    /// Whether a sender is registered for `transport`
    pub fn supports(&self, transport: Transport) -> bool {
        self.senders.contains_key(&transport)
    }

    /// Registered transports
    pub fn transports(&self) -> Vec<Transport> {
        let mut transports: Vec<Transport> = self.senders.keys().copied().collect();
        transports.sort_by_key(|t| t.as_str());
        transports
    }

    pub fn provider_name(&self, transport: Transport) -> Option<&str> {
        self.senders.get(&transport).map(|s| s.provider_name())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deliver `message` over `transport`
    ///
    /// Never fails: unknown transports, provider errors and timeouts all
    /// yield `success = false`.
    pub async fn send(&self, transport: Transport, message: &OtpMessage<'_>) -> DispatchResult {
        let masked = mask_identifier(message.identifier);

        let Some(sender) = self.senders.get(&transport) else {
            tracing::warn!(
                identifier = %masked,
                transport = %transport,
                event = "otp_dispatch_unsupported",
                "No sender configured for transport"
            );
            return DispatchResult::failed("Unsupported transport method", None);
        };

        match tokio::time::timeout(self.timeout, sender.send_code(message)).await {
            Ok(Ok(delivery)) => {
                tracing::info!(
                    identifier = %masked,
                    transport = %transport,
                    provider = sender.provider_name(),
                    event = "otp_dispatched",
                    "OTP delivered to provider"
                );
                DispatchResult::delivered(delivery)
            }
            Ok(Err(failure)) => {
                tracing::error!(
                    identifier = %masked,
                    transport = %transport,
                    provider = sender.provider_name(),
                    error = %failure,
                    event = "otp_dispatch_failed",
                    "Provider rejected OTP delivery"
                );
                DispatchResult::failed(failure.reason, failure.data)
            }
            Err(_) => {
                tracing::error!(
                    identifier = %masked,
                    transport = %transport,
                    provider = sender.provider_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    event = "otp_dispatch_timeout",
                    "OTP delivery timed out"
                );
                DispatchResult::failed(
                    format!("Timed out sending {} after {:?}", transport, self.timeout),
                    None,
                )
            }
        }
    }
}
