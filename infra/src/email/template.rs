//! Email bodies for OTP delivery

use dl_core::services::otp::OtpMessage;

/// Subject used when the caller supplies none
pub const DEFAULT_SUBJECT: &str = "Your OTP Code";

const TEXT_TEMPLATE: &str =
    "Your {{app_name}} OTP code is {{code}}. It expires in {{ttl_minutes}} minutes.";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #222;">
    <h2>Your Verification Code</h2>
    <p>Use the code below to continue with {{app_name}}.</p>
    <p style="font-size: 24px; letter-spacing: 4px;"><strong>{{code}}</strong></p>
    <p>This code will expire in {{ttl_minutes}} minutes. If you did not request it, you can ignore this email.</p>
    <p>The {{app_name}} Team</p>
  </body>
</html>
"#;

/// Rendered subject and bodies for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailContent {
    /// Render `message`, honouring its subject and HTML overrides
    pub fn render(message: &OtpMessage<'_>) -> Self {
        let subject = message
            .options
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUBJECT);
        let html = message.options.html_template.as_deref().unwrap_or(HTML_TEMPLATE);

        Self {
            subject: message.render(subject),
            html: message.render(html),
            text: message.render(TEXT_TEMPLATE),
        }
    }
}
