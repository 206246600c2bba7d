//! Numeric cell cleanup.
//!
//! Spreadsheet readers coerce integer-looking columns (ZIP codes, phone
//! numbers, policy numbers) into floats, so `10001` comes back as `10001.0`.
//! These helpers undo that artifact without touching genuine decimals.

use autodocs_model::format_float;

/// Literal marker a float-coerced whole number ends with.
const WHOLE_FLOAT_MARKER: &str = ".0";

/// Trim whitespace and drop a trailing `.0`.
///
/// Exactly the two-character marker is removed; this is not decimal
/// truncation, so `"12.50"` is returned unchanged.
pub fn trim_numeric_suffix(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_suffix(WHOLE_FLOAT_MARKER)
        .unwrap_or(trimmed)
        .to_string()
}

/// Re-print a value as a decimal number.
///
/// Blank input yields `""`. Input that does not parse as a float is
/// returned as-is. Whole numbers keep a decimal point (`"5"` -> `"5.0"`).
pub fn format_as_decimal(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match trimmed.parse::<f64>() {
        Ok(number) => format_float(number),
        Err(_) => value.to_string(),
    }
}
