//! Request and result types for the OTP service

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::{Purpose, Transport};

/// Overrides for the email body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Subject line; senders fall back to their default
    pub subject: Option<String>,
    /// HTML body; may contain `{{code}}`, `{{ttl_minutes}}` and `{{app_name}}`
    pub html_template: Option<String>,
}

impl DispatchOptions {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_html_template(mut self, template: impl Into<String>) -> Self {
        self.html_template = Some(template.into());
        self
    }
}

/// Everything a sender needs to deliver one code
#[derive(Debug, Clone, Copy)]
pub struct OtpMessage<'a> {
    pub identifier: &'a str,
    pub code: &'a str,
    pub purpose: Purpose,
    pub ttl_minutes: i64,
    pub app_name: &'a str,
    pub options: &'a DispatchOptions,
}

impl OtpMessage<'_> {
    /// Substitute message placeholders in `template`
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{{code}}", self.code)
            .replace("{{ttl_minutes}}", &self.ttl_minutes.to_string())
            .replace("{{app_name}}", self.app_name)
    }
}

/// Successful hand-off to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// Human-readable summary
    pub info: String,
    /// Provider payload (message id, provider response)
    pub data: Option<serde_json::Value>,
}

impl Delivery {
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Provider-side failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}")]
pub struct SendFailure {
    pub reason: String,
    /// Provider payload kept for diagnostics
    pub data: Option<serde_json::Value>,
}

impl SendFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Uniform result of a dispatch attempt; never an error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    pub info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl DispatchResult {
    pub fn delivered(delivery: Delivery) -> Self {
        Self {
            success: true,
            info: delivery.info,
            data: delivery.data,
        }
    }

    pub fn failed(info: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            info: info.into(),
            data,
        }
    }
}

/// Input to issue and resend
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub identifier: String,
    pub purpose: Purpose,
    pub transport: Transport,
    pub options: DispatchOptions,
}

impl IssueRequest {
    pub fn new(identifier: impl Into<String>, purpose: Purpose, transport: Transport) -> Self {
        Self {
            identifier: identifier.into(),
            purpose,
            transport,
            options: DispatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of issue or resend
///
/// Deliberately carries no code.
#[derive(Debug, Clone, Serialize)]
pub struct IssueOutcome {
    /// Normalised identifier the code is stored under
    pub identifier: String,
    pub purpose: Purpose,
    pub transport: Transport,
    pub expires_at: DateTime<Utc>,
    pub dispatch: DispatchResult,
}

impl IssueOutcome {
    pub fn is_delivered(&self) -> bool {
        self.dispatch.success
    }
}
