//! Phone number cleanup.

use super::numeric::trim_numeric_suffix;

/// Normalize a phone number for international dialing.
///
/// Applies [`trim_numeric_suffix`] and then drops a single leading `0`
/// (the domestic trunk prefix). No length or format validation is done.
pub fn normalize_phone(value: &str) -> String {
    let cleaned = trim_numeric_suffix(value);
    match cleaned.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => cleaned,
    }
}
