//! Cell value normalization.
//!
//! Pure functions that turn raw dataset cells into display strings. None of
//! them fail: anything they cannot interpret passes through.

mod numeric;
mod phone;

use autodocs_model::HeightFormat;

pub use numeric::{format_as_decimal, trim_numeric_suffix};
pub use phone::normalize_phone;

/// Format the height column according to the configured policy.
pub fn format_height(value: &str, format: HeightFormat) -> String {
    match format {
        HeightFormat::TrimSuffix => trim_numeric_suffix(value),
        HeightFormat::Decimal => format_as_decimal(value),
    }
}
