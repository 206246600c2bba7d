//! Error types for patient dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a patient dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset file not found.
    #[error("dataset file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding the reader cannot decode.
    #[error("unsupported encoding {encoding} in {path} (save the file as UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Text that is not valid UTF-8.
    #[error("{path} line {line} is not valid UTF-8 (save the file as UTF-8)")]
    InvalidUtf8 { path: PathBuf, line: u64 },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Workbook Errors ===
    /// Failed to open or read a spreadsheet workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no worksheet or its first worksheet is empty.
    #[error("workbook has no data in its first sheet: {path}")]
    EmptyWorkbook { path: PathBuf },

    /// Header row is missing or blank.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
