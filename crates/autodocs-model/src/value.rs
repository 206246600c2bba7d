//! Scalar cell values as delivered by tabular readers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of an input row.
///
/// Spreadsheet readers hand back whole numbers as floating values, so a
/// `Number` keeps that representation when stringified (`10001.0`). The
/// normalizer is responsible for trimming the marker where it matters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a value from raw text; blank text becomes `Empty`.
    pub fn from_text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::from_text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&format_float(*number)),
        }
    }
}

/// Render a float the way spreadsheet exports print it.
///
/// Shortest round-trip digits. Whole values keep a trailing `.0` (`5.0`).
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent form with a
/// signed two-digit exponent (`1e+16`, `1e-05`). Non-finite values are
/// spelled `nan`, `inf` and `-inf`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn format_exponent(value: f64) -> String {
    let text = format!("{value:e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return text;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
