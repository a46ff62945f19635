//! SMS transport module
//!
//! - **Arkesel**: HTTP delivery through the Arkesel send endpoint
//! - **Mock**: logs the message instead of sending it
//!
//! Both render the same body via [`sms_body`].

pub mod arkesel;
pub mod mock_sms;

pub use arkesel::ArkeselSmsSender;
pub use mock_sms::MockSmsSender;

use dl_core::services::otp::OtpMessage;

const SMS_TEMPLATE: &str =
    "Your {{app_name}} OTP code is {{code}}. It expires in {{ttl_minutes}} minutes.";

/// Plain-text SMS body for `message`
pub fn sms_body(message: &OtpMessage<'_>) -> String {
    message.render(SMS_TEMPLATE)
}
