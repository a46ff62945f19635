//! Code generation

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};

use super::config::OtpConfig;

/// Produce `config.length` digits drawn uniformly from the OS CSPRNG
pub fn generate_code(config: &OtpConfig) -> String {
    let mut rng = OsRng;
    (0..config.length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// `now + ttl_minutes`
pub fn expiry_from(now: DateTime<Utc>, config: &OtpConfig) -> DateTime<Utc> {
    now + Duration::minutes(config.ttl_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_length_and_alphabet() {
        for length in 4..=10 {
            let config = OtpConfig::new(length, 5);
            for _ in 0..50 {
                let code = generate_code(&config);
                assert_eq!(code.len(), length);
                assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_generate_code_uses_every_digit() {
        let config = OtpConfig::new(10, 5);
        let digits: HashSet<char> = (0..200).flat_map(|_| generate_code(&config).chars().collect::<Vec<_>>()).collect();
        assert_eq!(digits.len(), 10);
    }

    #[test]
    fn test_expiry_from() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, &OtpConfig::new(6, 5)), now + Duration::minutes(5));
    }
}
