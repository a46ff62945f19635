//! Email and SMS delivery configuration

use serde::{Deserialize, Serialize};

/// Default Arkesel send endpoint
pub const DEFAULT_SMS_ENDPOINT: &str = "https://sms.arkesel.com/sms/api";

/// Email back-end selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Real SMTP relay
    Smtp,
    /// Log-only sender for development
    #[default]
    Mock,
    /// Email transport disabled
    None,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            "none" | "disabled" => Ok(EmailProvider::None),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMS back-end selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Arkesel HTTP API
    Arkesel,
    /// Log-only sender for development
    #[default]
    Mock,
    /// SMS transport disabled
    None,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arkesel" => Ok(SmsProvider::Arkesel),
            "mock" => Ok(SmsProvider::Mock),
            "none" | "disabled" => Ok(SmsProvider::None),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// SMTP settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,

    /// Well-known service name (gmail, outlook, ...) used when no host is set
    #[serde(default)]
    pub service: Option<String>,

    /// Explicit SMTP host; wins over `service`
    #[serde(default)]
    pub host: Option<String>,

    pub port: u16,

    /// Implicit TLS when true, STARTTLS otherwise
    pub secure: bool,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    pub from_address: String,

    pub from_name: String,

    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            service: None,
            host: None,
            port: 587,
            secure: false,
            user: None,
            password: None,
            from_address: String::from("no-reply@daemonlite.com"),
            from_name: String::from("Daemonlite"),
            timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Resolve the SMTP host from `host` or the well-known `service`
    pub fn smtp_host(&self) -> Option<String> {
        self.host
            .clone()
            .or_else(|| self.service.as_deref().and_then(well_known_smtp_host).map(String::from))
    }
}

/// Map a well-known mail service name to its SMTP host
pub fn well_known_smtp_host(service: &str) -> Option<&'static str> {
    match service.to_lowercase().as_str() {
        "gmail" => Some("smtp.gmail.com"),
        "outlook" | "hotmail" | "office365" => Some("smtp.office365.com"),
        "yahoo" => Some("smtp.mail.yahoo.com"),
        "zoho" => Some("smtp.zoho.com"),
        "sendgrid" => Some("smtp.sendgrid.net"),
        "mailgun" => Some("smtp.mailgun.org"),
        _ => None,
    }
}

/// SMS gateway settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    pub provider: SmsProvider,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Sender ID shown on the handset
    pub sender: String,

    pub endpoint: String,

    pub timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            api_key: None,
            sender: String::from("Daemonlite"),
            endpoint: String::from(DEFAULT_SMS_ENDPOINT),
            timeout_secs: 10,
        }
    }
}

/// Delivery configuration for both transports
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Brand used in message bodies
    pub app_name: String,
    pub email: EmailConfig,
    pub sms: SmsConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("Daemonlite"),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_smtp_host() {
        assert_eq!(well_known_smtp_host("Gmail"), Some("smtp.gmail.com"));
        assert_eq!(well_known_smtp_host("mailgun"), Some("smtp.mailgun.org"));
        assert_eq!(well_known_smtp_host("pigeon"), None);
    }

    #[test]
    fn test_explicit_host_wins_over_service() {
        let config = EmailConfig {
            service: Some("gmail".into()),
            host: Some("mail.internal".into()),
            ..Default::default()
        };
        assert_eq!(config.smtp_host().as_deref(), Some("mail.internal"));

        let config = EmailConfig {
            service: Some("gmail".into()),
            ..Default::default()
        };
        assert_eq!(config.smtp_host().as_deref(), Some("smtp.gmail.com"));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("SMTP".parse::<EmailProvider>().unwrap(), EmailProvider::Smtp);
        assert_eq!("none".parse::<SmsProvider>().unwrap(), SmsProvider::None);
        assert!("twilio".parse::<SmsProvider>().is_err());
    }
}
