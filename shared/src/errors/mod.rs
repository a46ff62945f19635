//! Shared error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
///
/// Any of these aborts start-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {name}")]
    Missing { name: String },

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },

    #[error("No notification transport is enabled")]
    NoTransportEnabled,
}

impl ConfigError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
