//! Error types for the transform crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A fixed date could not be parsed.
    #[error("invalid date '{value}': expected DD/MM/YYYY")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
