//! SMTP email sender backed by lettre's async transport

use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use dl_core::domain::value_objects::Transport;
use dl_core::services::otp::{Delivery, NotificationSender, OtpMessage, SendFailure};
use dl_shared::config::EmailConfig;
use dl_shared::utils::email::mask_email;

use super::template::EmailContent;
use crate::InfrastructureError;

/// Sends OTP emails through an authenticated SMTP relay
///
/// `secure` selects implicit TLS (usually port 465); otherwise the
/// connection is upgraded with STARTTLS (usually port 587).
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpEmailSender {
    /// Build the transport from configuration
    ///
    /// Fails when the host, credentials or sender address are missing or
    /// malformed. No connection is opened until the first send.
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let host = config.smtp_host().ok_or_else(|| {
            InfrastructureError::Config("SMTP host is not configured".to_string())
        })?;
        let user = config
            .user
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_USER is not set".to_string()))?;
        let password = config
            .password
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_PASSWORD is not set".to_string()))?;

        let address: Address = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address: {}", e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(user, password))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        info!(host = %host, port = config.port, secure = config.secure, "SMTP email sender configured");

        Ok(Self {
            transport,
            from,
            host,
        })
    }

    fn message_id(&self) -> String {
        let domain = self.from.email.domain();
        format!("<{}@{}>", Uuid::new_v4(), domain)
    }

    fn build_message(
        &self,
        to: &str,
        content: EmailContent,
        message_id: &str,
    ) -> Result<Message, SendFailure> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| SendFailure::new(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject)
            .message_id(Some(message_id.to_string()))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| SendFailure::new(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl NotificationSender for SmtpEmailSender {
    fn transport(&self) -> Transport {
        Transport::Email
    }

    fn provider_name(&self) -> &str {
        "smtp"
    }

    async fn send_code(&self, message: &OtpMessage<'_>) -> Result<Delivery, SendFailure> {
        let masked = mask_email(message.identifier);
        let message_id = self.message_id();
        let email = self.build_message(message.identifier, EmailContent::render(message), &message_id)?;

        debug!(to = %masked, host = %self.host, "Sending OTP email");

        match self.transport.send(email).await {
            Ok(response) => {
                info!(to = %masked, message_id = %message_id, "OTP email accepted by SMTP relay");
                Ok(Delivery::new("Email sent successfully").with_data(serde_json::json!({
                    "messageId": message_id,
                    "response": response.first_line(),
                })))
            }
            Err(e) => {
                error!(to = %masked, error = %e, "SMTP delivery failed");
                Err(SendFailure::new("Failed to send email")
                    .with_data(serde_json::json!({"error": e.to_string()})))
            }
        }
    }
}
