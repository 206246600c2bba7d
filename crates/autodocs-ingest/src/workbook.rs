//! Patient dataset loading from spreadsheet workbooks.
//!
//! Only the first worksheet is read. Its first row is the header row, the
//! same as a CSV export of that sheet.

use std::path::Path;

use autodocs_model::{CellValue, Dataset, PatientRecord};
use calamine::{Data, Reader, open_workbook_auto};

use crate::csv::{CsvHeaders, check_file_size};
use crate::error::{IngestError, Result};

/// File extensions read as workbooks rather than CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True when `path` has a workbook extension.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Reads the first worksheet of a workbook.
///
/// Numeric cells stay numbers, so whole values print as `10001.0` until the
/// normalizer trims them.
pub fn read_workbook(path: &Path) -> Result<Dataset> {
    check_file_size(path)?;

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| workbook_error(path, e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };
    let headers = CsvHeaders::from_raw(header_row.iter().map(header_text));
    if headers.is_empty() || headers.is_blank() {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    for (original, renamed) in &headers.renamed {
        tracing::warn!(
            path = %path.display(),
            column = %original,
            renamed = %renamed,
            "duplicate column header renamed"
        );
    }

    let mut records = Vec::new();
    for cells in rows {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let row = records.len() + 1;
        let mut record = PatientRecord::new(row);
        for (index, column) in headers.columns.iter().enumerate() {
            let value = cells
                .get(index)
                .map(|cell| cell_value(cell, path, row, column))
                .unwrap_or_default();
            record.insert(column, value);
        }
        records.push(record);
    }

    let dataset = Dataset::new(headers.columns, records);
    tracing::debug!(
        path = %path.display(),
        columns = dataset.headers.len(),
        records = dataset.len(),
        "workbook loaded"
    );
    Ok(dataset.with_source(path))
}

fn workbook_error(path: &Path, err: calamine::Error) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(number) => autodocs_model::format_float(*number),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data, path: &Path, row: usize, column: &str) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::from_text(text.as_str()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::from_text(if *flag { "True" } else { "False" }),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => CellValue::from_text(datetime.to_string()),
            None => CellValue::Number(value.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text.as_str()),
        Data::Error(error) => {
            tracing::warn!(
                path = %path.display(),
                row,
                column,
                error = %error,
                "cell holds a spreadsheet error; treated as blank"
            );
            CellValue::Empty
        }
    }
}
