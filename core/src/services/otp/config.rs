//! Configuration for OTP generation and the issuing service

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use dl_shared::config::{OtpSettings, MAX_CODE_LENGTH, MAX_TTL_MINUTES, MIN_CODE_LENGTH};

use crate::domain::entities::{DEFAULT_CODE_LENGTH, DEFAULT_TTL_MINUTES};
use crate::domain::value_objects::Purpose;
use crate::errors::ValidationError;

use super::generator;

/// Code shape and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpConfig {
    /// Number of digits
    pub length: usize,
    /// Minutes until expiry
    pub ttl_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}

impl OtpConfig {
    pub fn new(length: usize, ttl_minutes: i64) -> Self {
        Self { length, ttl_minutes }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.length) {
            return Err(ValidationError::OutOfRange {
                field: "length".to_string(),
                min: MIN_CODE_LENGTH.to_string(),
                max: MAX_CODE_LENGTH.to_string(),
            });
        }
        if !(1..=MAX_TTL_MINUTES).contains(&self.ttl_minutes) {
            return Err(ValidationError::OutOfRange {
                field: "ttl_minutes".to_string(),
                min: "1".to_string(),
                max: MAX_TTL_MINUTES.to_string(),
            });
        }
        Ok(())
    }

    /// Mint a code of this length
    pub fn generate(&self) -> String {
        generator::generate_code(self)
    }

    /// Expiry for a code issued at `now`
    pub fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        generator::expiry_from(now, self)
    }
}

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Shape used when a purpose has no override
    pub default: OtpConfig,
    /// Per-purpose shape overrides
    pub overrides: HashMap<Purpose, OtpConfig>,
    /// Reject codes presented for a purpose other than the one issued
    pub enforce_purpose: bool,
    /// Brand used in message bodies
    pub app_name: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            default: OtpConfig::default(),
            overrides: HashMap::new(),
            enforce_purpose: true,
            app_name: String::from("Daemonlite"),
        }
    }
}

impl OtpServiceConfig {
    /// Build from settings loaded at start-up
    pub fn from_settings(settings: &OtpSettings, app_name: impl Into<String>) -> Self {
        Self {
            default: OtpConfig::new(settings.code_length, settings.ttl_minutes),
            overrides: HashMap::new(),
            enforce_purpose: settings.enforce_purpose,
            app_name: app_name.into(),
        }
    }

    /// Use `config` for codes issued for `purpose`
    pub fn with_purpose(mut self, purpose: Purpose, config: OtpConfig) -> Self {
        self.overrides.insert(purpose, config);
        self
    }

    pub fn with_enforce_purpose(mut self, enforce: bool) -> Self {
        self.enforce_purpose = enforce;
        self
    }

    pub fn for_purpose(&self, purpose: Purpose) -> &OtpConfig {
        self.overrides.get(&purpose).unwrap_or(&self.default)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default.validate()?;
        for config in self.overrides.values() {
            config.validate()?;
        }
        Ok(())
    }
}
