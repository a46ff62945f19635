//! Delivery channel for a code

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use dl_shared::identifier::IdentifierKind;

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Email,
    Sms,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Email => "email",
            Transport::Sms => "sms",
        }
    }

    /// Identifier kind this transport can deliver to
    pub fn identifier_kind(&self) -> IdentifierKind {
        match self {
            Transport::Email => IdentifierKind::Email,
            Transport::Sms => IdentifierKind::Phone,
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Transport::Email),
            "sms" => Ok(Transport::Sms),
            "" => Err(ValidationError::required("transport")),
            other => Err(ValidationError::UnsupportedTransport {
                transport: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_from_str() {
        assert_eq!("EMAIL".parse::<Transport>().unwrap(), Transport::Email);
        assert_eq!("sms".parse::<Transport>().unwrap(), Transport::Sms);
        assert!(matches!(
            "pigeon".parse::<Transport>(),
            Err(ValidationError::UnsupportedTransport { .. })
        ));
    }

    #[test]
    fn test_identifier_kind() {
        assert_eq!(Transport::Email.identifier_kind(), IdentifierKind::Email);
        assert_eq!(Transport::Sms.identifier_kind(), IdentifierKind::Phone);
    }
}
