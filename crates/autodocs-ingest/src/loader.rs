//! Dataset loading by file type.

use std::path::Path;

use autodocs_model::Dataset;

use crate::csv::read_csv;
use crate::error::Result;
use crate::workbook::{is_workbook, read_workbook};

/// Reads a patient dataset, picking the reader from the file extension.
///
/// Workbook extensions (see [`crate::WORKBOOK_EXTENSIONS`]) go through the
/// spreadsheet reader; everything else is parsed as CSV.
pub fn read_records(path: &Path) -> Result<Dataset> {
    if is_workbook(path) {
        read_workbook(path)
    } else {
        read_csv(path)
    }
}
