//! Error types for document output.

use std::path::PathBuf;

use autodocs_model::TemplateKind;
use thiserror::Error;

/// Errors raised while loading or filling a DOCX template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template file could not be read.
    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template is not a usable DOCX package.
    #[error("invalid template {name}: {reason}")]
    InvalidTemplate { name: String, reason: String },

    /// `{{` without a matching `}}`.
    #[error("unclosed placeholder in {part} at byte {offset}")]
    UnclosedPlaceholder { part: String, offset: usize },

    /// Placeholder content is not a bare field name.
    #[error("unsupported placeholder expression in {part}: {{{{ {expression} }}}}")]
    InvalidExpression { part: String, expression: String },

    /// `{% ... %}` blocks are not supported.
    #[error("template statements are not supported ({part} at byte {offset})")]
    UnsupportedStatement { part: String, offset: usize },

    /// Placeholder names a field the context does not have (strict mode only).
    #[error("unknown placeholder '{name}' in {part}")]
    UnknownPlaceholder { part: String, name: String },

    /// Package part is not valid UTF-8.
    #[error("part {part} is not valid UTF-8")]
    InvalidEncoding { part: String },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the dispatcher when a batch is aborted.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("row {row} ({kind}): {source}")]
    Render {
        row: usize,
        kind: TemplateKind,
        #[source]
        source: RenderError,
    },

    #[error("row {row} ({kind}): failed to write {path}: {source}")]
    Write {
        row: usize,
        kind: TemplateKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DispatchError {
    /// Row the failure belongs to.
    pub fn row(&self) -> usize {
        match self {
            Self::Render { row, .. } | Self::Write { row, .. } => *row,
        }
    }

    /// Template kind the failure belongs to.
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Render { kind, .. } | Self::Write { kind, .. } => *kind,
        }
    }
}

/// Errors raised during PDF conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no .docx files to convert in {dir}")]
    NoInputs { dir: PathBuf },

    #[error("converter '{binary}' not found; install LibreOffice or pass --converter")]
    ConverterMissing { binary: PathBuf },

    #[error("failed to launch converter '{binary}': {source}")]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("converter produced no PDF files in {dir}{}", diagnostic_suffix(.diagnostic))]
    NoOutput {
        dir: PathBuf,
        diagnostic: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn diagnostic_suffix(diagnostic: &Option<String>) -> String {
    diagnostic
        .as_deref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}

/// Errors raised while packaging output files.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to create archive {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
