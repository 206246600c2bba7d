//! CSV reading utilities.

mod header;
mod reader;

pub use header::{CsvHeaders, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv,
    read_records_from_bytes, validate_encoding,
};
