//! Phone number utilities

use regex::Regex;
use once_cell::sync::Lazy;

// Optional leading '+', country code must not start with 0, 7 to 15 digits in total
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9]\d{6,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number looks dialable
///
/// Formatting characters (spaces, dashes, parentheses) are ignored. The
/// remaining value must be 7 to 15 digits with an optional leading `+`.
pub fn is_valid_phone_number(phone: &str) -> bool {
    if phone.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logging, keeping the last 4 digits
///
/// ```
/// use dl_shared::utils::phone::mask_phone_number;
/// assert_eq!(mask_phone_number("+1234567890"), "+******7890");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let visible_digits = 4;
    let total = phone.chars().count();
    if total <= visible_digits {
        return "*".repeat(total);
    }

    let masked_count = total - visible_digits;
    let last_digits: String = phone.chars().skip(masked_count).collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
