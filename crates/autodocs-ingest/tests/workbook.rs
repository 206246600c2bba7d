//! Workbook loading tests.

use std::path::Path;

use autodocs_ingest::{IngestError, read_records};
use autodocs_model::CellValue;
use rust_xlsxwriter::Workbook;

fn write_patients(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in [" Full Name ", "Last Name", "ZIP Code", "Primary Phone", "Products"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, header).unwrap();
    }
    sheet.write_string(1, 0, "Jane").unwrap();
    sheet.write_string(1, 1, "Doe").unwrap();
    sheet.write_number(1, 2, 10001.0).unwrap();
    sheet.write_number(1, 3, 551234567.0).unwrap();
    sheet.write_string(1, 4, "RKB BB").unwrap();
    sheet.write_string(3, 0, "Sam").unwrap();
    sheet.write_string(3, 4, "LKB").unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn first_sheet_is_read_with_numeric_cells() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("patients.xlsx");
    write_patients(&path);

    let dataset = read_records(&path).unwrap();

    assert_eq!(
        dataset.headers,
        vec!["Full Name", "Last Name", "ZIP Code", "Primary Phone", "Products"]
    );
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.source.as_deref(), Some(path.as_path()));

    let jane = &dataset.records[0];
    assert_eq!(jane.get("ZIP Code"), Some(&CellValue::Number(10001.0)));
    assert_eq!(jane.text("ZIP Code"), "10001.0");
    assert_eq!(jane.text("Products"), "RKB BB");

    let sam = &dataset.records[1];
    assert_eq!(sam.row, 2);
    assert_eq!(sam.get("Last Name"), Some(&CellValue::Empty));
    assert_eq!(sam.text("Products"), "LKB");
}

#[test]
fn uppercase_extension_is_a_workbook() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("PATIENTS.XLSX");
    write_patients(&path);

    assert_eq!(read_records(&path).unwrap().len(), 2);
}

#[test]
fn corrupt_workbook_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("patients.xlsx");
    std::fs::write(&path, b"Full Name,Products\nJane,BB\n").unwrap();

    let result = read_records(&path);
    assert!(matches!(result, Err(IngestError::Workbook { .. })));
}

#[test]
fn missing_workbook_is_not_found() {
    let result = read_records(Path::new("/definitely/not/here.xlsx"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}
