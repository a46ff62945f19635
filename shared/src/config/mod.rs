//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `notification` - SMTP and SMS gateway settings
//! - `otp` - Code length, lifetime and purpose enforcement
//! - `rate_limit` - Per-IP limits on OTP issuance
//! - `server` - HTTP server configuration
//! - `store` - OTP persistence back-end
//!
//! Everything is read from process variables once at start-up.

pub mod environment;
pub mod notification;
pub mod otp;
pub mod rate_limit;
pub mod server;
pub mod store;

use serde::Serialize;
use std::str::FromStr;

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{
    well_known_smtp_host, EmailConfig, EmailProvider, NotificationConfig, SmsConfig, SmsProvider,
    DEFAULT_SMS_ENDPOINT,
};
pub use otp::{OtpSettings, MAX_CODE_LENGTH, MAX_TTL_MINUTES, MIN_CODE_LENGTH};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub otp: OtpSettings,
    pub store: StoreConfig,
    pub notifications: NotificationConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// The result is validated before it is returned.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup: &lookup };

        let environment: Environment = vars.parse_or("ENVIRONMENT", Environment::Development)?;
        let log_defaults = LoggingConfig::for_environment(environment);
        let app_name = vars.string_or("APP_NAME", "Daemonlite");

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: vars.string_or("SERVER_HOST", &server_defaults.host),
            port: vars.parse_or("SERVER_PORT", server_defaults.port)?,
            workers: vars.parse_or("SERVER_WORKERS", server_defaults.workers)?,
            allowed_origins: vars
                .get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        let otp_defaults = OtpSettings::default();
        let otp = OtpSettings {
            code_length: vars.parse_or("OTP_CODE_LENGTH", otp_defaults.code_length)?,
            ttl_minutes: vars.parse_or("OTP_TTL_MINUTES", otp_defaults.ttl_minutes)?,
            enforce_purpose: vars.bool_or("OTP_ENFORCE_PURPOSE", otp_defaults.enforce_purpose)?,
            dispatch_timeout_secs: vars
                .parse_or("OTP_DISPATCH_TIMEOUT_SECS", otp_defaults.dispatch_timeout_secs)?,
        };

        let store_defaults = StoreConfig::default();
        let store = StoreConfig {
            backend: vars.parse_or("OTP_STORE", StoreBackend::Memory)?,
            redis_url: vars.get("REDIS_URL"),
            database_url: vars.get("DATABASE_URL"),
            max_connections: vars
                .parse_or("DATABASE_MAX_CONNECTIONS", store_defaults.max_connections)?,
            max_retries: vars.parse_or("REDIS_MAX_RETRIES", store_defaults.max_retries)?,
            retry_delay_ms: vars.parse_or("REDIS_RETRY_DELAY_MS", store_defaults.retry_delay_ms)?,
        };

        let secure = vars.bool_or("EMAIL_SECURE", false)?;
        let email = EmailConfig {
            provider: vars.parse_or("EMAIL_PROVIDER", EmailProvider::Mock)?,
            service: vars.get("EMAIL_SERVICE"),
            host: vars.get("EMAIL_HOST"),
            port: vars.parse_or("EMAIL_PORT", if secure { 465 } else { 587 })?,
            secure,
            user: vars.get("EMAIL_USER"),
            password: vars.get("EMAIL_PASSWORD"),
            from_address: vars.string_or("EMAIL_FROM", "no-reply@daemonlite.com"),
            from_name: vars.string_or("EMAIL_FROM_NAME", &app_name),
            timeout_secs: otp.dispatch_timeout_secs,
        };

        let sms = SmsConfig {
            provider: vars.parse_or("SMS_PROVIDER", SmsProvider::Mock)?,
            api_key: vars.get("SMS_KEY"),
            sender: vars.string_or("SMS_SENDER", &app_name),
            endpoint: vars.string_or("SMS_ENDPOINT", DEFAULT_SMS_ENDPOINT),
            timeout_secs: otp.dispatch_timeout_secs,
        };

        let rate_limit_defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            enabled: vars.bool_or("RATE_LIMIT_ENABLED", rate_limit_defaults.enabled)?,
            max_requests: vars.parse_or("RATE_LIMIT_REQUESTS", rate_limit_defaults.max_requests)?,
            window_secs: vars.parse_or("RATE_LIMIT_WINDOW_SECS", rate_limit_defaults.window_secs)?,
        };

        let logging = LoggingConfig {
            level: vars.string_or("LOG_LEVEL", &log_defaults.level),
            format: vars.parse_or("LOG_FORMAT", log_defaults.format)?,
        };

        let config = Self {
            environment,
            server,
            otp,
            store,
            notifications: NotificationConfig {
                app_name,
                email,
                sms,
            },
            rate_limit,
            logging,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.otp.code_length) {
            return Err(ConfigError::invalid(
                "OTP_CODE_LENGTH",
                format!("must be between {} and {}", MIN_CODE_LENGTH, MAX_CODE_LENGTH),
            ));
        }

        if !(1..=MAX_TTL_MINUTES).contains(&self.otp.ttl_minutes) {
            return Err(ConfigError::invalid(
                "OTP_TTL_MINUTES",
                format!("must be between 1 and {}", MAX_TTL_MINUTES),
            ));
        }

        if self.otp.dispatch_timeout_secs == 0 {
            return Err(ConfigError::invalid("OTP_DISPATCH_TIMEOUT_SECS", "must be positive"));
        }

        match self.store.backend {
            StoreBackend::Redis if self.store.redis_url.is_none() => {
                return Err(ConfigError::missing("REDIS_URL"));
            }
            StoreBackend::Mysql if self.store.database_url.is_none() => {
                return Err(ConfigError::missing("DATABASE_URL"));
            }
            _ => {}
        }

        let email = &self.notifications.email;
        if email.provider == EmailProvider::Smtp {
            if email.smtp_host().is_none() {
                return Err(match &email.service {
                    Some(service) => ConfigError::invalid(
                        "EMAIL_SERVICE",
                        format!("unknown service '{}', set EMAIL_HOST instead", service),
                    ),
                    None => ConfigError::missing("EMAIL_HOST"),
                });
            }
            if email.user.is_none() {
                return Err(ConfigError::missing("EMAIL_USER"));
            }
            if email.password.is_none() {
                return Err(ConfigError::missing("EMAIL_PASSWORD"));
            }
        }

        let sms = &self.notifications.sms;
        if sms.provider == SmsProvider::Arkesel && sms.api_key.is_none() {
            return Err(ConfigError::missing("SMS_KEY"));
        }

        if email.provider == EmailProvider::None && sms.provider == SmsProvider::None {
            return Err(ConfigError::NoTransportEnabled);
        }

        if self.rate_limit.enabled
            && (self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0)
        {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_REQUESTS",
                "limit and window must be positive when rate limiting is enabled",
            ));
        }

        Ok(())
    }
}

/// Typed access to configuration variables
struct Vars<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Vars<'_> {
    /// Trimmed value, with empty strings treated as unset
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| ConfigError::invalid(name, e.to_string())),
            None => Ok(default),
        }
    }

    fn bool_or(&self, name: &str, default: bool) -> ConfigResult<bool> {
        match self.get(name).map(|v| v.to_lowercase()) {
            None => Ok(default),
            Some(v) => match v.as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::invalid(name, format!("'{}' is not a boolean", v))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> ConfigResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.ttl_minutes, 5);
        assert!(config.otp.enforce_purpose);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.notifications.email.provider, EmailProvider::Mock);
        assert_eq!(config.notifications.sms.provider, SmsProvider::Mock);
        assert_eq!(config.notifications.sms.endpoint, DEFAULT_SMS_ENDPOINT);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_arkesel_requires_api_key() {
        let err = load(&[("SMS_PROVIDER", "arkesel")]).unwrap_err();
        assert_eq!(err, ConfigError::missing("SMS_KEY"));

        let config = load(&[("SMS_PROVIDER", "arkesel"), ("SMS_KEY", "secret")]).unwrap();
        assert_eq!(config.notifications.sms.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let err = load(&[("EMAIL_PROVIDER", "smtp"), ("EMAIL_SERVICE", "gmail")]).unwrap_err();
        assert_eq!(err, ConfigError::missing("EMAIL_USER"));

        let err = load(&[
            ("EMAIL_PROVIDER", "smtp"),
            ("EMAIL_SERVICE", "gmail"),
            ("EMAIL_USER", "bot@gmail.com"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::missing("EMAIL_PASSWORD"));

        let err = load(&[
            ("EMAIL_PROVIDER", "smtp"),
            ("EMAIL_USER", "bot@gmail.com"),
            ("EMAIL_PASSWORD", "pw"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::missing("EMAIL_HOST"));
    }

    #[test]
    fn test_smtp_secure_defaults_port() {
        let config = load(&[
            ("EMAIL_PROVIDER", "smtp"),
            ("EMAIL_SERVICE", "gmail"),
            ("EMAIL_USER", "bot@gmail.com"),
            ("EMAIL_PASSWORD", "pw"),
            ("EMAIL_SECURE", "true"),
        ])
        .unwrap();

        assert_eq!(config.notifications.email.port, 465);
        assert_eq!(
            config.notifications.email.smtp_host().as_deref(),
            Some("smtp.gmail.com")
        );
    }

    #[test]
    fn test_code_length_bounds() {
        assert!(load(&[("OTP_CODE_LENGTH", "3")]).is_err());
        assert!(load(&[("OTP_CODE_LENGTH", "11")]).is_err());
        assert_eq!(load(&[("OTP_CODE_LENGTH", "5")]).unwrap().otp.code_length, 5);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let err = load(&[("OTP_TTL_MINUTES", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "OTP_TTL_MINUTES"));
    }

    #[test]
    fn test_ttl_upper_bound() {
        assert!(load(&[("OTP_TTL_MINUTES", "1440")]).is_ok());
        let err = load(&[("OTP_TTL_MINUTES", "1441")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "OTP_TTL_MINUTES"));
        assert!(load(&[("OTP_TTL_MINUTES", "9223372036854775")]).is_err());
    }

    #[test]
    fn test_store_backend_requires_url() {
        assert_eq!(
            load(&[("OTP_STORE", "redis")]).unwrap_err(),
            ConfigError::missing("REDIS_URL")
        );
        assert_eq!(
            load(&[("OTP_STORE", "mysql")]).unwrap_err(),
            ConfigError::missing("DATABASE_URL")
        );
        assert!(load(&[("OTP_STORE", "redis"), ("REDIS_URL", "redis://localhost:6379")]).is_ok());
    }

    #[test]
    fn test_invalid_values_are_reported_by_name() {
        let err = load(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "SERVER_PORT"));

        let err = load(&[("OTP_ENFORCE_PURPOSE", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "OTP_ENFORCE_PURPOSE"));
    }

    #[test]
    fn test_all_transports_disabled() {
        let err = load(&[("EMAIL_PROVIDER", "none"), ("SMS_PROVIDER", "none")]).unwrap_err();
        assert_eq!(err, ConfigError::NoTransportEnabled);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("OTP_CODE_LENGTH", "  "), ("APP_NAME", "Blogly")]).unwrap();
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.notifications.sms.sender, "Blogly");
        assert_eq!(config.notifications.email.from_name, "Blogly");
    }

    #[test]
    fn test_cors_origins_are_split() {
        let config = load(&[("CORS_ALLOWED_ORIGINS", "https://a.dev, https://b.dev,")]).unwrap();
        assert_eq!(config.server.allowed_origins, vec!["https://a.dev", "https://b.dev"]);
    }
}
