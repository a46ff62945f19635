//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{OtpRecord, DEFAULT_CODE_LENGTH, DEFAULT_TTL_MINUTES};
