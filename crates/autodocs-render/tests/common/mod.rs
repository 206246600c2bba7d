//! Shared fixtures: minimal DOCX packages built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use autodocs_model::{PatientRecord, TemplateKind};
use autodocs_render::{DOCUMENT_PART, DocxTemplate};
use autodocs_transform::{ContextBuilder, FixedClock};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#;

pub fn body(paragraphs: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}</w:body></w:document>"#
    )
}

/// A package with the given parts, `[Content_Types].xml` stored uncompressed.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(
            "[Content_Types].xml",
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
        .unwrap();
    writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    for (name, content) in parts {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn template(kind: TemplateKind, paragraphs: &str) -> DocxTemplate {
    let document = body(paragraphs);
    DocxTemplate::from_bytes(
        kind,
        format!("{}.docx", kind.suffix()),
        package(&[(DOCUMENT_PART, document.as_str())]),
    )
    .unwrap()
}

pub fn read_part(bytes: &[u8], part: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(part)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

pub fn builder() -> ContextBuilder<FixedClock> {
    ContextBuilder::new(FixedClock::parse("19/10/2026").unwrap())
}

pub fn record(row: usize, first: &str, last: &str, products: &str) -> PatientRecord {
    PatientRecord::from_pairs(
        row,
        [
            ("Full Name", first),
            ("Last Name", last),
            ("Products", products),
        ],
    )
}
