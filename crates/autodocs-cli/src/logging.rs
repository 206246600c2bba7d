//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! All crates log through `tracing`; this module installs the subscriber for
//! the `autodocs` binary.
//!
//! # Log Levels
//!
//! - `error`: Conversion failures, fatal errors
//! - `warn`: Skipped documents, overwritten files, odd CSV rows
//! - `info`: Stage progress and summary counts
//! - `debug`: Per-record and per-template details
//! - `trace`: Classification of every record
//!
//! Patient names and other row values only reach the log through
//! [`redact_value`], which hides them unless `--log-data` was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose level follows the configured filter.
const CRATES: &[&str] = &[
    "autodocs",
    "autodocs_cli",
    "autodocs_ingest",
    "autodocs_model",
    "autodocs_render",
    "autodocs_transform",
];

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when PHI logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the autodocs crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the configured level.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    /// Emit span close events (JSON format only).
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file path. When set, logs are written to the file.
    pub log_file: Option<PathBuf>,
    /// Whether row-level (PHI/PII) values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level_filter = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable row-level logging of sensitive values.
    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Filter directives for the configured level, ignoring `RUST_LOG`.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directives = vec!["warn".to_string()];
        directives.extend(CRATES.iter().map(|name| format!("{name}={level}")));
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(format_layer(config, writer))
        .init();
}

fn format_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    let timed = config.with_timestamps;

    match config.format {
        LogFormat::Json => layer
            .json()
            .with_span_events(if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        LogFormat::Compact if timed => layer.compact().with_ansi(config.with_ansi).boxed(),
        LogFormat::Compact => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        LogFormat::Pretty if timed => layer.with_ansi(config.with_ansi).boxed(),
        LogFormat::Pretty => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// `RUST_LOG` wins when allowed and set; otherwise our crates log at the
/// configured level and everything else at `warn`.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_every_crate() {
        let config = LogConfig::default().with_level(LevelFilter::DEBUG);
        let directives = config.directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("autodocs_render=debug"));
        assert!(directives.contains("autodocs=debug"));
    }

    #[test]
    fn test_every_format_builds_a_layer() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            for with_timestamps in [false, true] {
                let config = LogConfig {
                    with_timestamps,
                    ..LogConfig::default().with_format(format)
                };
                let layer = format_layer::<tracing_subscriber::Registry, _>(&config, io::sink);
                let subscriber = tracing_subscriber::registry().with(layer);
                tracing::subscriber::with_default(subscriber, || {
                    tracing::warn!("written to the sink");
                });
            }
        }
    }

    #[test]
    fn test_redaction_follows_flag() {
        LOG_DATA_ENABLED.store(false, Ordering::Release);
        assert_eq!(redact_value("Jane Doe"), REDACTED_VALUE);
    }
}
