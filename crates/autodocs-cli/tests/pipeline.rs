//! Integration tests for the generation pipeline.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use autodocs_cli::pipeline::{
    GenerateRequest, TemplatePaths, ingest, inspect, load_templates, run_convert, run_generate,
};
use autodocs_cli::types::ConversionOutcome;
use autodocs_model::{FailurePolicy, GenerationOptions, WorkflowStep};
use autodocs_render::{ConversionReport, ConvertError, PdfConverter, files_with_extension, pdf_path};
use autodocs_transform::{ContextBuilder, FixedClock};
use zip::write::SimpleFileOptions;

const PATIENTS: &str = "\
Full Name,Last Name,Products,Primary Phone,Height,ZIP Code
Jane,Doe,RKB BB,0551234567,5.0,10001.0
Sam,Lee,LKB,,,
Ann,Kim,E0114,,,
";

fn docx(text: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    write!(
        writer,
        "<w:document><w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>"
    )
    .unwrap();
    writer.finish().unwrap().into_inner()
}

fn document_text(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("patients.csv"), PATIENTS).unwrap();
        fs::write(
            dir.path().join("back.docx"),
            docx("{{ first_name }} {{ last_name }} {{ date }} {{ phone }} {{ zip }} {{ height }}"),
        )
        .unwrap();
        fs::write(dir.path().join("knee.docx"), docx("L{{ L }} R{{ R }}")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn request(&self) -> GenerateRequest {
        GenerateRequest {
            data: self.path("patients.csv"),
            templates: TemplatePaths {
                back_brace: Some(self.path("back.docx")),
                knee_brace: Some(self.path("knee.docx")),
            },
            output_dir: self.path("out"),
            options: GenerationOptions::default(),
            clean: false,
            archive_name: None,
        }
    }
}

fn clock() -> FixedClock {
    FixedClock::parse("19/10/2026").unwrap()
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// Writes a PDF next to every document.
struct CopyConverter;

impl PdfConverter for CopyConverter {
    fn convert(
        &self,
        documents: &[PathBuf],
        out_dir: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        let mut pdfs = Vec::new();
        for document in documents {
            let pdf = pdf_path(document, out_dir);
            fs::write(&pdf, b"%PDF-1.7")?;
            pdfs.push(pdf);
        }
        Ok(ConversionReport {
            pdfs,
            diagnostic: None,
        })
    }
}

struct BrokenConverter;

impl PdfConverter for BrokenConverter {
    fn convert(
        &self,
        _documents: &[PathBuf],
        _out_dir: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        Err(ConvertError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "source file could not be loaded".to_string(),
        })
    }
}

/// Exits cleanly without writing anything, like an office suite whose
/// profile is locked by another instance.
struct SilentConverter;

impl PdfConverter for SilentConverter {
    fn convert(
        &self,
        _documents: &[PathBuf],
        out_dir: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        Err(ConvertError::NoOutput {
            dir: out_dir.to_path_buf(),
            diagnostic: Some("user installation could not be completed".to_string()),
        })
    }
}

fn zip_entries(path: &Path) -> Vec<String> {
    let zip = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut entries: Vec<_> = zip.file_names().map(str::to_string).collect();
    entries.sort();
    entries
}

#[test]
fn generates_documents_for_matching_patients() {
    let fixture = Fixture::new();
    let result = run_generate(&fixture.request(), clock(), None, |_| {}).unwrap();

    assert_eq!(result.report.records, 3);
    assert_eq!(result.report.unmatched, 1);
    assert_eq!(result.workflow.step(), WorkflowStep::Generate);
    assert!(matches!(result.conversion, ConversionOutcome::NotRequested));
    assert!(!result.has_errors());

    let written = files_with_extension(&fixture.path("out"), "docx").unwrap();
    insta::assert_snapshot!(names(&written).join("\n"), @r"
    Jane_Doe_Back_Brace.docx
    Jane_Doe_Knee_Brace.docx
    Sam_Lee_Knee_Brace.docx
    ");

    let back = document_text(&fixture.path("out/Jane_Doe_Back_Brace.docx"));
    assert!(back.contains("<w:t>Jane Doe 19/10/2026 551234567 10001 5</w:t>"));
    let knee = document_text(&fixture.path("out/Sam_Lee_Knee_Brace.docx"));
    assert!(knee.contains("<w:t>L☑ R☐</w:t>"));
}

#[test]
fn conversion_and_archive_finish_the_workflow() {
    let fixture = Fixture::new();
    let mut request = fixture.request();
    request.archive_name = Some("Completed_Docs.zip".to_string());

    let result = run_generate(&request, clock(), Some(&CopyConverter), |_| {}).unwrap();

    assert_eq!(result.workflow.step(), WorkflowStep::Finish);
    assert_eq!(result.conversion.pdf_count(), 3);
    let archive = result.archive.expect("archive written");
    assert_eq!(archive, fixture.path("out/Completed_Docs.zip"));

    assert_eq!(
        zip_entries(&archive),
        vec![
            "Jane_Doe_Back_Brace.pdf",
            "Jane_Doe_Knee_Brace.pdf",
            "Sam_Lee_Knee_Brace.pdf"
        ]
    );
}

#[test]
fn failed_conversion_keeps_documents() {
    let fixture = Fixture::new();
    let result = run_generate(&fixture.request(), clock(), Some(&BrokenConverter), |_| {}).unwrap();

    assert!(result.conversion.is_failed());
    assert!(result.has_errors());
    assert_eq!(result.workflow.step(), WorkflowStep::Generate);
    assert_eq!(result.report.documents.len(), 3);
}

#[test]
fn silent_converter_failure_keeps_its_diagnostic() {
    let fixture = Fixture::new();
    let result = run_generate(&fixture.request(), clock(), Some(&SilentConverter), |_| {}).unwrap();

    let ConversionOutcome::Failed(message) = &result.conversion else {
        panic!("expected a failed conversion, got {:?}", result.conversion);
    };
    assert!(message.contains("no PDF files"));
    assert!(message.contains("user installation could not be completed"));
    assert!(result.has_errors());
}

#[test]
fn second_run_packages_only_its_own_documents() {
    let fixture = Fixture::new();
    let mut request = fixture.request();
    request.archive_name = Some("Completed_Docs.zip".to_string());

    fs::write(fixture.path("patients.csv"), "Full Name,Last Name,Products\nOld,Patient,BB\n").unwrap();
    run_generate(&request, clock(), Some(&CopyConverter), |_| {}).unwrap();

    fs::write(fixture.path("patients.csv"), "Full Name,Last Name,Products\nNew,Patient,BB\n").unwrap();
    let result = run_generate(&request, clock(), Some(&CopyConverter), |_| {}).unwrap();

    assert_eq!(result.report.overwritten, 0);
    assert_eq!(result.conversion.pdf_count(), 1);
    assert_eq!(
        zip_entries(&fixture.path("out/Completed_Docs.zip")),
        vec!["New_Patient_Back_Brace.pdf"]
    );
    assert!(fixture.path("out/Old_Patient_Back_Brace.docx").exists());

    let unconverted = run_generate(&request, clock(), None, |_| {}).unwrap();
    assert!(unconverted.archive.is_some());
    assert_eq!(
        zip_entries(&fixture.path("out/Completed_Docs.zip")),
        vec!["New_Patient_Back_Brace.docx"]
    );
}

#[test]
fn no_matches_skips_conversion() {
    let fixture = Fixture::new();
    fs::write(fixture.path("patients.csv"), "Full Name,Last Name,Products\nAnn,Kim,E0114\n").unwrap();

    let result = run_generate(&fixture.request(), clock(), Some(&CopyConverter), |_| {}).unwrap();

    assert!(result.report.documents.is_empty());
    assert!(matches!(result.conversion, ConversionOutcome::Skipped));
    assert_eq!(result.workflow.step(), WorkflowStep::Upload);
    assert!(!result.has_errors());
}

#[test]
fn strict_placeholders_abort_by_default() {
    let fixture = Fixture::new();
    fs::write(fixture.path("knee.docx"), docx("{{ nickname }}")).unwrap();
    let mut request = fixture.request();
    request.options = GenerationOptions::new().with_strict_placeholders(true);

    let error = run_generate(&request, clock(), None, |_| {}).unwrap_err();
    assert!(format!("{error:#}").contains("nickname"));
}

#[test]
fn continue_policy_reports_failures() {
    let fixture = Fixture::new();
    fs::write(fixture.path("knee.docx"), docx("{{ nickname }}")).unwrap();
    let mut request = fixture.request();
    request.options = GenerationOptions::new()
        .with_strict_placeholders(true)
        .with_failure_policy(FailurePolicy::Continue);

    let result = run_generate(&request, clock(), None, |_| {}).unwrap();
    assert_eq!(result.report.failures.len(), 2);
    assert_eq!(result.report.documents.len(), 1);
    assert!(result.has_errors());
}

#[test]
fn clean_removes_previous_output() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path("out")).unwrap();
    fs::write(fixture.path("out/Old_Patient_Back_Brace.docx"), b"old").unwrap();
    fs::write(fixture.path("out/Old_Patient_Back_Brace.pdf"), b"old").unwrap();
    let mut request = fixture.request();
    request.clean = true;

    let result = run_generate(&request, clock(), None, |_| {}).unwrap();
    assert_eq!(result.cleaned, 2);
    assert!(!fixture.path("out/Old_Patient_Back_Brace.docx").exists());
}

#[test]
fn templates_are_required() {
    let error = load_templates(&TemplatePaths::default()).unwrap_err();
    assert!(error.to_string().contains("no templates"));
}

#[test]
fn workbook_numbers_lose_their_float_marker() {
    let fixture = Fixture::new();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Full Name", "Last Name", "Products", "Primary Phone", "Height", "ZIP Code"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, header).unwrap();
    }
    sheet.write_string(1, 0, "Jane").unwrap();
    sheet.write_string(1, 1, "Doe").unwrap();
    sheet.write_string(1, 2, "BB").unwrap();
    sheet.write_number(1, 3, 551234567.0).unwrap();
    sheet.write_number(1, 4, 5.0).unwrap();
    sheet.write_number(1, 5, 10001.0).unwrap();
    workbook.save(fixture.path("patients.xlsx")).unwrap();

    let dataset = ingest(&fixture.path("patients.xlsx")).unwrap();
    let plans = inspect(&dataset, &ContextBuilder::new(clock()));
    assert_eq!(plans[0].context.zip, "10001");
    assert_eq!(plans[0].context.phone, "551234567");

    let mut request = fixture.request();
    request.data = fixture.path("patients.xlsx");
    let result = run_generate(&request, clock(), None, |_| {}).unwrap();
    assert_eq!(result.report.documents.len(), 1);
    let back = document_text(&fixture.path("out/Jane_Doe_Back_Brace.docx"));
    assert!(back.contains("<w:t>Jane Doe 19/10/2026 551234567 10001 5</w:t>"));
}

#[test]
fn convert_existing_folder() {
    let fixture = Fixture::new();
    run_generate(&fixture.request(), clock(), None, |_| {}).unwrap();

    let result = run_convert(&fixture.path("out"), &CopyConverter, Some("bundle.zip")).unwrap();
    assert_eq!(result.report.pdfs.len(), 3);
    assert_eq!(result.archive, Some(fixture.path("out/bundle.zip")));
}
