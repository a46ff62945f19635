//! Construction tests for the SMTP sender; nothing here opens a connection

use dl_core::domain::value_objects::Transport;
use dl_core::services::otp::NotificationSender;
use dl_shared::config::{EmailConfig, EmailProvider};

use crate::email::SmtpEmailSender;
use crate::InfrastructureError;

fn config() -> EmailConfig {
    EmailConfig {
        provider: EmailProvider::Smtp,
        service: Some("gmail".to_string()),
        user: Some("mailer@example.com".to_string()),
        password: Some("app-password".to_string()),
        ..EmailConfig::default()
    }
}

#[test]
fn test_builds_from_known_service() {
    let sender = SmtpEmailSender::from_config(&config()).unwrap();

    assert_eq!(sender.transport(), Transport::Email);
    assert_eq!(sender.provider_name(), "smtp");
}

#[test]
fn test_builds_with_implicit_tls() {
    let config = EmailConfig {
        host: Some("smtp.example.com".to_string()),
        port: 465,
        secure: true,
        ..config()
    };

    assert!(SmtpEmailSender::from_config(&config).is_ok());
}

#[test]
fn test_missing_host_is_config_error() {
    let config = EmailConfig {
        service: Some("carrier-pigeon".to_string()),
        host: None,
        ..config()
    };

    assert!(matches!(
        SmtpEmailSender::from_config(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_missing_credentials_is_config_error() {
    let config = EmailConfig {
        password: None,
        ..config()
    };

    assert!(matches!(
        SmtpEmailSender::from_config(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_invalid_sender_address_is_config_error() {
    let config = EmailConfig {
        from_address: "not-an-address".to_string(),
        ..config()
    };

    assert!(matches!(
        SmtpEmailSender::from_config(&config),
        Err(InfrastructureError::Config(_))
    ));
}
