//! Patient dataset ingestion.
//!
//! Loads the tabular export that drives document generation into
//! [`autodocs_model::Dataset`] values.
//!
//! # Features
//!
//! - **CSV Loading**: header row trimmed, UTF-8 BOM stripped, short rows padded
//! - **Workbook Loading**: first sheet of `.xlsx`/`.xls`/`.ods`, numbers kept numeric
//! - **Input Checks**: size limit, UTF-16 detection, invalid UTF-8 rejection
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use autodocs_ingest::read_records;
//!
//! let dataset = read_records(Path::new("patients.csv"))?;
//! for record in &dataset.records {
//!     println!("{}", record.text("Full Name"));
//! }
//! ```

mod csv;
mod error;
mod loader;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit,
    normalize_header, read_csv, read_records_from_bytes, validate_encoding,
};

// === Workbook Reading ===
pub use workbook::{WORKBOOK_EXTENSIONS, is_workbook, read_workbook};

// === Loading ===
pub use loader::read_records;
