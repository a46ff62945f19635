//! Dispatcher assembly
//!
//! Registers one sender per enabled transport. A transport configured for a
//! real provider without its credentials is a startup error.

use std::sync::Arc;
use std::time::Duration;

use dl_core::services::otp::NotificationDispatcher;
use dl_shared::config::{AppConfig, EmailProvider, SmsProvider};

use crate::email::{MockEmailSender, SmtpEmailSender};
use crate::sms::{ArkeselSmsSender, MockSmsSender};
use crate::InfrastructureError;

/// Build the dispatcher described by `config`
pub fn build_dispatcher(config: &AppConfig) -> Result<NotificationDispatcher, InfrastructureError> {
    let notifications = &config.notifications;
    let mut dispatcher =
        NotificationDispatcher::new(Duration::from_secs(config.otp.dispatch_timeout_secs));

    match notifications.email.provider {
        EmailProvider::Smtp => {
            dispatcher.register(Arc::new(SmtpEmailSender::from_config(&notifications.email)?))
        }
        EmailProvider::Mock => dispatcher.register(Arc::new(MockEmailSender::new())),
        EmailProvider::None => {}
    }

    match notifications.sms.provider {
        SmsProvider::Arkesel => {
            dispatcher.register(Arc::new(ArkeselSmsSender::from_config(&notifications.sms)?))
        }
        SmsProvider::Mock => dispatcher.register(Arc::new(MockSmsSender::new())),
        SmsProvider::None => {}
    }

    if dispatcher.transports().is_empty() {
        return Err(InfrastructureError::Config(
            "no notification transport is enabled".to_string(),
        ));
    }

    for transport in dispatcher.transports() {
        tracing::info!(
            transport = %transport,
            provider = dispatcher.provider_name(transport).unwrap_or("unknown"),
            "Notification transport enabled"
        );
    }

    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::domain::value_objects::Transport;

    fn load(pairs: &[(&str, &str)]) -> AppConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| {
            pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    #[test]
    fn test_default_config_uses_mocks() {
        let dispatcher = build_dispatcher(&load(&[])).unwrap();

        assert_eq!(dispatcher.transports(), vec![Transport::Email, Transport::Sms]);
        assert_eq!(dispatcher.provider_name(Transport::Email), Some("mock"));
        assert_eq!(dispatcher.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_real_providers_are_registered() {
        let dispatcher = build_dispatcher(&load(&[
            ("EMAIL_PROVIDER", "smtp"),
            ("EMAIL_SERVICE", "gmail"),
            ("EMAIL_USER", "mailer@example.com"),
            ("EMAIL_PASSWORD", "secret"),
            ("SMS_PROVIDER", "arkesel"),
            ("SMS_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(dispatcher.provider_name(Transport::Email), Some("smtp"));
        assert_eq!(dispatcher.provider_name(Transport::Sms), Some("arkesel"));
    }

    #[test]
    fn test_disabled_transport_is_not_registered() {
        let dispatcher = build_dispatcher(&load(&[("SMS_PROVIDER", "none")])).unwrap();

        assert!(dispatcher.supports(Transport::Email));
        assert!(!dispatcher.supports(Transport::Sms));
    }

    #[test]
    fn test_missing_credentials_fail_at_build() {
        let mut config = load(&[]);
        config.notifications.sms.provider = SmsProvider::Arkesel;
        config.notifications.sms.api_key = None;

        assert!(matches!(
            build_dispatcher(&config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
