//! Reason an OTP was issued

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

/// Account flow that requested the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    /// Proving ownership of an email/phone during sign-up
    #[serde(rename = "verification")]
    Verification,
    /// Second factor at login
    #[serde(rename = "login-2fa", alias = "2fa")]
    LoginTwoFactor,
    /// Forgot-password flow
    #[serde(rename = "password-reset", alias = "forgot-password")]
    PasswordReset,
}

impl Purpose {
    pub const ALL: [Purpose; 3] = [
        Purpose::Verification,
        Purpose::LoginTwoFactor,
        Purpose::PasswordReset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Verification => "verification",
            Purpose::LoginTwoFactor => "login-2fa",
            Purpose::PasswordReset => "password-reset",
        }
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verification" => Ok(Purpose::Verification),
            "login-2fa" | "2fa" => Ok(Purpose::LoginTwoFactor),
            "password-reset" | "forgot-password" => Ok(Purpose::PasswordReset),
            "" => Err(ValidationError::required("purpose")),
            other => Err(ValidationError::UnknownPurpose {
                purpose: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_from_str_with_aliases() {
        assert_eq!("verification".parse::<Purpose>().unwrap(), Purpose::Verification);
        assert_eq!("2fa".parse::<Purpose>().unwrap(), Purpose::LoginTwoFactor);
        assert_eq!("Login-2FA".parse::<Purpose>().unwrap(), Purpose::LoginTwoFactor);
        assert_eq!("forgot-password".parse::<Purpose>().unwrap(), Purpose::PasswordReset);
    }

    #[test]
    fn test_purpose_from_str_rejects_unknown() {
        assert_eq!(
            "newsletter".parse::<Purpose>().unwrap_err(),
            ValidationError::UnknownPurpose { purpose: "newsletter".into() }
        );
        assert_eq!("  ".parse::<Purpose>().unwrap_err(), ValidationError::required("purpose"));
    }

    #[test]
    fn test_purpose_serde_names() {
        assert_eq!(serde_json::to_string(&Purpose::PasswordReset).unwrap(), "\"password-reset\"");
        let parsed: Purpose = serde_json::from_str("\"2fa\"").unwrap();
        assert_eq!(parsed, Purpose::LoginTwoFactor);
    }
}
