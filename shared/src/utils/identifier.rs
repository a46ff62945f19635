//! OTP identifier helpers
//!
//! An identifier is the email address or phone number a code is bound to.

use serde::{Deserialize, Serialize};

use super::email::{is_valid_email, mask_email};
use super::phone::{is_valid_phone_number, mask_phone_number, normalize_phone_number};

/// Kind of channel an identifier addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Email,
    Phone,
}

impl IdentifierKind {
    /// Classify an identifier, returning `None` when it is neither form
    pub fn classify(identifier: &str) -> Option<Self> {
        if is_valid_email(identifier) {
            Some(IdentifierKind::Email)
        } else if is_valid_phone_number(identifier) {
            Some(IdentifierKind::Phone)
        } else {
            None
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Email => write!(f, "email"),
            IdentifierKind::Phone => write!(f, "phone"),
        }
    }
}

/// Canonical form used as the store key
///
/// Surrounding whitespace is dropped and email addresses are lower-cased.
/// Valid phone numbers lose their formatting characters so one handset maps
/// to one key. Anything else is only trimmed and left for validation.
pub fn normalize_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('@') {
        trimmed.to_lowercase()
    } else if is_valid_phone_number(trimmed) {
        normalize_phone_number(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Mask an identifier of either kind for logging
pub fn mask_identifier(identifier: &str) -> String {
    if identifier.contains('@') {
        mask_email(identifier)
    } else {
        mask_phone_number(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(IdentifierKind::classify("a@b.com"), Some(IdentifierKind::Email));
        assert_eq!(IdentifierKind::classify("+10000000"), Some(IdentifierKind::Phone));
        assert_eq!(IdentifierKind::classify("not an identifier"), None);
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  Jane@Example.COM "), "jane@example.com");
        assert_eq!(normalize_identifier(" +233241234567"), "+233241234567");
        assert_eq!(normalize_identifier("+1 415 555 2671"), "+14155552671");
        assert_eq!(normalize_identifier("+1 (415) 555-2671"), "+14155552671");
        assert_eq!(normalize_identifier(" not an identifier "), "not an identifier");
    }

    #[test]
    fn test_mask_identifier() {
        assert_eq!(mask_identifier("jane@example.com"), "j***@example.com");
        assert_eq!(mask_identifier("+233241234567"), "+********4567");
    }
}
