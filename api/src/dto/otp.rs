//! OTP request bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use dl_core::domain::value_objects::{Purpose, Transport};
use dl_core::errors::{DomainError, ValidationError};
use dl_core::services::otp::{DispatchOptions, IssueRequest};

/// Body of `POST /api/v1/otp/send` and `POST /api/v1/otp/resend`
///
/// `identifier` may be omitted when `email` (email transport) or
/// `phoneNumber` (sms transport) carries the recipient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(length(max = 254, message = "identifier is too long"))]
    pub identifier: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "phoneNumber is too long"))]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub purpose: String,

    #[serde(default)]
    pub transport: String,

    #[validate(length(max = 200, message = "subject is too long"))]
    pub subject: Option<String>,
}

impl SendOtpRequest {
    /// Recipient for `transport`, preferring the explicit identifier
    pub fn recipient(&self, transport: Transport) -> Option<&str> {
        let fallback = match transport {
            Transport::Email => self.email.as_deref(),
            Transport::Sms => self.phone_number.as_deref(),
        };

        non_blank(self.identifier.as_deref()).or_else(|| non_blank(fallback))
    }

    /// Parse into the service request
    pub fn into_issue_request(self) -> Result<IssueRequest, DomainError> {
        let transport: Transport = self.transport.parse()?;
        let purpose: Purpose = self.purpose.parse()?;
        let identifier = self
            .recipient(transport)
            .ok_or_else(|| ValidationError::required("identifier"))?
            .to_string();

        let mut options = DispatchOptions::default();
        if let Some(subject) = non_blank(self.subject.as_deref()) {
            options = options.with_subject(subject);
        }

        Ok(IssueRequest::new(identifier, purpose, transport).with_options(options))
    }
}

/// Body of `POST /api/v1/otp/verify`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "identifier is too long"))]
    pub identifier: String,

    #[serde(default)]
    #[validate(length(max = 32, message = "code is too long"))]
    pub code: String,

    #[serde(default)]
    pub purpose: String,
}

impl VerifyOtpRequest {
    pub fn parsed_purpose(&self) -> Result<Purpose, DomainError> {
        Ok(self.purpose.parse::<Purpose>()?)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_falls_back_by_transport() {
        let request = SendOtpRequest {
            email: Some("a@b.com".to_string()),
            phone_number: Some("+233241234567".to_string()),
            ..SendOtpRequest::default()
        };

        assert_eq!(request.recipient(Transport::Email), Some("a@b.com"));
        assert_eq!(request.recipient(Transport::Sms), Some("+233241234567"));

        let explicit = SendOtpRequest {
            identifier: Some("c@d.com".to_string()),
            ..request
        };
        assert_eq!(explicit.recipient(Transport::Email), Some("c@d.com"));
    }

    #[test]
    fn test_camel_case_body() {
        let request: SendOtpRequest = serde_json::from_value(serde_json::json!({
            "phoneNumber": "+233241234567",
            "purpose": "login-2fa",
            "transport": "sms"
        }))
        .unwrap();

        let issue = request.into_issue_request().unwrap();
        assert_eq!(issue.identifier, "+233241234567");
        assert_eq!(issue.purpose, Purpose::LoginTwoFactor);
        assert_eq!(issue.transport, Transport::Sms);
    }

    #[test]
    fn test_missing_fields_are_validation_errors() {
        let missing_identifier = SendOtpRequest {
            purpose: "verification".to_string(),
            transport: "email".to_string(),
            ..SendOtpRequest::default()
        };
        assert!(matches!(
            missing_identifier.into_issue_request(),
            Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
        ));

        let bad_transport = SendOtpRequest {
            identifier: Some("a@b.com".to_string()),
            purpose: "verification".to_string(),
            transport: "pigeon".to_string(),
            ..SendOtpRequest::default()
        };
        assert!(matches!(
            bad_transport.into_issue_request(),
            Err(DomainError::ValidationErr(ValidationError::UnsupportedTransport { .. }))
        ));
    }

    #[test]
    fn test_email_field_is_validated() {
        let request = SendOtpRequest {
            email: Some("not-an-email".to_string()),
            ..SendOtpRequest::default()
        };
        assert!(request.validate().is_err());
    }
}
