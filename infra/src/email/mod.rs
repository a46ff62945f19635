//! Email transport module
//!
//! - **SMTP**: delivery through lettre's async SMTP transport
//! - **Mock**: logs the message instead of sending it
//! - **Templates**: branded HTML and plain-text bodies

pub mod mock;
pub mod smtp;
pub mod template;

pub use mock::MockEmailSender;
pub use smtp::SmtpEmailSender;
pub use template::{EmailContent, DEFAULT_SUBJECT};

#[cfg(test)]
mod tests;
