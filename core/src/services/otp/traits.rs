//! Traits for notification transport integration

use async_trait::async_trait;

use crate::domain::value_objects::Transport;

use super::types::{Delivery, OtpMessage, SendFailure};

/// Trait for a delivery back-end (SMTP relay, SMS gateway, mock)
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Channel this sender delivers on
    fn transport(&self) -> Transport;

    /// Provider name used in logs
    fn provider_name(&self) -> &str;

    /// Deliver the code; provider problems come back as `SendFailure`
    async fn send_code(&self, message: &OtpMessage<'_>) -> Result<Delivery, SendFailure>;
}
