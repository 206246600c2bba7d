//! Persistent defaults loaded from `settings.toml`.
//!
//! Command-line flags override anything set here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autodocs_model::{FailurePolicy, GenerationOptions, HeightFormat};
use autodocs_render::DEFAULT_ARCHIVE_NAME;
use serde::Deserialize;

const CONFIG_FILENAME: &str = "settings.toml";

/// Output folder used when neither a flag nor the settings name one.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_docs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub conversion: ConversionSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub height_format: HeightFormat,
    pub failure_policy: FailurePolicy,
    /// Fail on placeholders the context does not define.
    pub strict_placeholders: bool,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// LibreOffice executable; the platform default when unset.
    pub binary: Option<PathBuf>,
    pub archive_name: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            binary: None,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "autodocs", "autodocs")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load settings from `path`, or from [`Settings::config_path`].
    ///
    /// An explicit path must exist and parse. The default location is
    /// optional: a missing file gives defaults, an unreadable one is
    /// reported and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        let Some(path) = Self::config_path() else {
            tracing::debug!("no config directory on this platform, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from(&path) {
            Ok(settings) => Ok(settings),
            Err(error) => {
                tracing::warn!(path = %path.display(), "ignoring settings file: {error:#}");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parse settings {}", path.display()))?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions::new()
            .with_height_format(self.generation.height_format)
            .with_failure_policy(self.generation.failure_policy)
            .with_strict_placeholders(self.generation.strict_placeholders)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.generation
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}
