//! Patient dataset loading from CSV files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use autodocs_model::{CellValue, Dataset, PatientRecord};
use ::csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Maximum file size for CSV loading (100 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 100 * 1024 * 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    check_bom(&buffer[..bytes_read], path)
}

fn check_bom(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.len() >= 2 {
        // UTF-16 LE BOM
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads a patient dataset from a UTF-8 CSV file.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let dataset = read_records_from_bytes(&bytes, path)?;
    tracing::debug!(
        path = %path.display(),
        columns = dataset.headers.len(),
        records = dataset.len(),
        "csv loaded"
    );
    Ok(dataset.with_source(path))
}

/// Parses CSV content into a dataset.
///
/// `path` is only used for error reporting. Cells missing from short rows
/// are filled with empty values so every record carries every column. Bytes
/// that are not UTF-8 fail the load instead of being replaced.
pub fn read_records_from_bytes(bytes: &[u8], path: &Path) -> Result<Dataset> {
    check_bom(bytes, path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let raw_headers = reader
        .byte_headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let header_line = raw_headers.position().map_or(1, |pos| pos.line());
    let header_cells = raw_headers
        .iter()
        .map(|field| utf8_field(field, path, header_line))
        .collect::<Result<Vec<_>>>()?;
    let headers = CsvHeaders::from_raw(header_cells);
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
    for result in reader.byte_records() {
        let raw = result.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // Blank line
        if raw.len() == 1 && raw.get(0).is_some_and(|f| f.trim_ascii().is_empty()) {
            continue;
        }

        let row = records.len() + 1;
        if raw.len() > headers.len() {
            tracing::warn!(
                path = %path.display(),
                row,
                fields = raw.len(),
                columns = headers.len(),
                "row has more fields than headers; extra fields ignored"
            );
        }

        let line = raw.position().map_or(0, |pos| pos.line());
        let mut record = PatientRecord::new(row);
        for (index, column) in headers.columns.iter().enumerate() {
            let value = match raw.get(index) {
                Some(field) => CellValue::from_text(utf8_field(field, path, line)?),
                None => CellValue::Empty,
            };
            record.insert(column, value);
        }
        records.push(record);
    }

    Ok(Dataset::new(headers.columns, records))
}

fn utf8_field(field: &[u8], path: &Path, line: u64) -> Result<String> {
    std::str::from_utf8(field)
        .map(str::to_string)
        .map_err(|_| IngestError::InvalidUtf8 {
            path: path.to_path_buf(),
            line,
        })
}
