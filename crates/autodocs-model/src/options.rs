//! Configuration options for document generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How the `Height` column is turned into display text.
///
/// Both policies have been used for the same templates, so the choice is
/// left to configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightFormat {
    /// Strip a trailing `.0` and keep everything else verbatim (`5'8` survives).
    #[default]
    TrimSuffix,
    /// Re-print as a decimal number (`5` becomes `5.0`).
    Decimal,
}

impl HeightFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrimSuffix => "trim-suffix",
            Self::Decimal => "decimal",
        }
    }
}

impl fmt::Display for HeightFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeightFormat {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trim-suffix" | "trim" => Ok(Self::TrimSuffix),
            "decimal" | "float" => Ok(Self::Decimal),
            _ => Err(ModelError::InvalidOption {
                option: "height format",
                value: value.to_string(),
                expected: "trim-suffix, decimal",
            }),
        }
    }
}

/// What the dispatcher does when rendering a record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the batch at the first failure.
    #[default]
    Abort,
    /// Record the failure and move on to the next record.
    Continue,
}

impl FailurePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Continue => "continue",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            _ => Err(ModelError::InvalidOption {
                option: "failure policy",
                value: value.to_string(),
                expected: "abort, continue",
            }),
        }
    }
}

/// Options controlling context building and dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub height_format: HeightFormat,
    pub failure_policy: FailurePolicy,
    /// Reject templates that reference placeholders the context lacks.
    pub strict_placeholders: bool,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_height_format(mut self, format: HeightFormat) -> Self {
        self.height_format = format;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_strict_placeholders(mut self, enable: bool) -> Self {
        self.strict_placeholders = enable;
        self
    }
}
