//! Form generation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the patient CSV
//! 2. **Templates**: Load the back brace and knee brace templates
//! 3. **Generate**: Build each record's context and write its documents
//! 4. **Convert**: Optionally turn the documents into PDFs
//! 5. **Package**: Optionally zip the results
//!
//! A [`Workflow`] value is carried through the stages and records how far the
//! run got.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use autodocs_ingest::read_records;
use autodocs_model::{Dataset, GenerationOptions, TemplateKind, Workflow, columns};
use autodocs_render::{
    DispatchReport, Dispatcher, DocxRenderer, DocxTemplate, PdfConverter, Progress, TemplateSet,
    prepare_output_dir, write_archive_files,
};
use autodocs_transform::{Clock, ContextBuilder, RecordPlan};
use tracing::{debug, info, info_span, warn};

use crate::logging::redact_value;
use crate::types::{ConversionOutcome, ConvertResult, GenerateResult};

/// Template files supplied for a run. At least one is required.
#[derive(Debug, Clone, Default)]
pub struct TemplatePaths {
    pub back_brace: Option<PathBuf>,
    pub knee_brace: Option<PathBuf>,
}

impl TemplatePaths {
    fn iter(&self) -> impl Iterator<Item = (TemplateKind, &Path)> {
        [
            (TemplateKind::BackBrace, self.back_brace.as_deref()),
            (TemplateKind::KneeBrace, self.knee_brace.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|p| (kind, p)))
    }
}

/// Everything a generation run needs besides the clock and converter.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub data: PathBuf,
    pub templates: TemplatePaths,
    pub output_dir: PathBuf,
    pub options: GenerationOptions,
    /// Remove earlier `.docx`/`.pdf` output first.
    pub clean: bool,
    /// Zip the results under this name inside the output folder.
    pub archive_name: Option<String>,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Read the patient dataset and warn about missing columns.
pub fn ingest(path: &Path) -> Result<Dataset> {
    let dataset = read_records(path).with_context(|| format!("read {}", path.display()))?;
    let missing = dataset.missing_columns(&columns::ALL);
    if !missing.is_empty() {
        warn!(
            missing = %missing.join(", "),
            "dataset lacks expected columns; their fields will be blank"
        );
    }
    if dataset.is_empty() {
        warn!(path = %path.display(), "dataset has no records");
    }
    Ok(dataset)
}

// ============================================================================
// Stage 2: Templates
// ============================================================================

pub fn load_templates(paths: &TemplatePaths) -> Result<TemplateSet> {
    let mut set = TemplateSet::new();
    for (kind, path) in paths.iter() {
        let template = DocxTemplate::load(kind, path)
            .with_context(|| format!("load {kind} template {}", path.display()))?;
        let unknown = template
            .unknown_placeholders()
            .with_context(|| format!("scan {kind} template {}", path.display()))?;
        if !unknown.is_empty() {
            warn!(
                template = %template.name(),
                placeholders = %unknown.join(", "),
                "template uses placeholders no record provides"
            );
        }
        set.insert(template);
    }
    if set.is_empty() {
        bail!("no templates given; pass --back-template and/or --knee-template");
    }
    Ok(set)
}

// ============================================================================
// Stage 3: Generate
// ============================================================================

/// Render every record into the output folder.
pub fn generate<C, F>(
    dataset: &Dataset,
    templates: &TemplateSet,
    builder: &ContextBuilder<C>,
    output_dir: &Path,
    options: &GenerationOptions,
    progress: F,
) -> Result<DispatchReport>
where
    C: Clock,
    F: FnMut(Progress<'_>),
{
    let renderer = DocxRenderer::new().with_strict_placeholders(options.strict_placeholders);
    let report = Dispatcher::new(&renderer, templates, output_dir)
        .with_failure_policy(options.failure_policy)
        .dispatch_with_progress(&dataset.records, builder, progress)
        .context("generate documents")?;

    for document in &report.documents {
        let file = document
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(row = document.row, kind = %document.kind, file = %redact_value(&file), "generated");
    }
    Ok(report)
}

/// Context and classification of every record, without writing anything.
pub fn inspect<C: Clock>(dataset: &Dataset, builder: &ContextBuilder<C>) -> Vec<RecordPlan> {
    dataset.records.iter().map(|record| builder.build(record)).collect()
}

// ============================================================================
// Stage 4: Convert
// ============================================================================

/// Convert this run's documents and advance the workflow on success.
///
/// A failed conversion is reported in the outcome instead of failing the run,
/// since the documents themselves were written.
pub fn convert(
    converter: &dyn PdfConverter,
    documents: &[PathBuf],
    dir: &Path,
    workflow: &mut Workflow,
) -> Result<ConversionOutcome> {
    if !workflow.is_ready_for_conversion() {
        warn!("no documents were generated; skipping PDF conversion");
        return Ok(ConversionOutcome::Skipped);
    }

    let span = info_span!("convert", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let outcome = match converter.convert(documents, dir) {
        Ok(report) => {
            if let Some(diagnostic) = &report.diagnostic {
                debug!(diagnostic = %diagnostic, "converter output");
            }
            info!(
                pdfs = report.pdfs.len(),
                duration_ms = start.elapsed().as_millis(),
                "conversion complete"
            );
            ConversionOutcome::Converted(report)
        }
        Err(error) => {
            tracing::error!(error = %error, "conversion failed");
            ConversionOutcome::Failed(error.to_string())
        }
    };
    workflow
        .record_conversion(!outcome.is_failed())
        .context("record conversion")?;
    Ok(outcome)
}

// ============================================================================
// Stage 5: Package
// ============================================================================

/// Zip `files` into `dir/name`.
pub fn package(dir: &Path, files: &[PathBuf], name: &str) -> Result<PathBuf> {
    let dest = dir.join(name);
    let added = write_archive_files(files, &dest)
        .with_context(|| format!("write archive {}", dest.display()))?;
    if added.is_empty() {
        warn!(archive = %dest.display(), "archive is empty");
    }
    Ok(dest)
}

// ============================================================================
// Runs
// ============================================================================

/// Run ingest through packaging. `converter` enables the PDF stage.
pub fn run_generate<C, F>(
    request: &GenerateRequest,
    clock: C,
    converter: Option<&dyn PdfConverter>,
    progress: F,
) -> Result<GenerateResult>
where
    C: Clock,
    F: FnMut(Progress<'_>),
{
    let span = info_span!("generate", source = %request.data.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut workflow = Workflow::new();

    let dataset = ingest(&request.data)?;
    let templates = load_templates(&request.templates)?;
    info!(
        records = dataset.len(),
        columns = dataset.headers.len(),
        "dataset loaded"
    );

    let cleaned = prepare_output_dir(&request.output_dir, request.clean)
        .with_context(|| format!("prepare {}", request.output_dir.display()))?;

    let builder = ContextBuilder::with_options(clock, &request.options);
    let report = generate(
        &dataset,
        &templates,
        &builder,
        &request.output_dir,
        &request.options,
        progress,
    )?;
    workflow.record_generation(report.documents.len());
    if report.documents.is_empty() {
        warn!("no documents generated; check the Products column");
    }

    let documents = report.paths();
    let conversion = match converter {
        Some(converter) => convert(converter, &documents, &request.output_dir, &mut workflow)?,
        None => ConversionOutcome::NotRequested,
    };

    let archive = match &request.archive_name {
        Some(name) if !documents.is_empty() => {
            let files = match &conversion {
                ConversionOutcome::Converted(converted) => converted.pdfs.as_slice(),
                _ => documents.as_slice(),
            };
            Some(package(&request.output_dir, files, name)?)
        }
        _ => None,
    };

    info!(
        documents = report.documents.len(),
        step = %workflow.step(),
        duration_ms = start.elapsed().as_millis(),
        "generation run complete"
    );

    Ok(GenerateResult {
        source: request.data.clone(),
        output_dir: request.output_dir.clone(),
        report,
        cleaned,
        conversion,
        archive,
        workflow,
        duration: start.elapsed(),
    })
}

/// Convert an existing folder of documents, optionally zipping the PDFs.
pub fn run_convert(
    dir: &Path,
    converter: &dyn PdfConverter,
    archive_name: Option<&str>,
) -> Result<ConvertResult> {
    let span = info_span!("convert", dir = %dir.display());
    let _guard = span.enter();
    let report = converter
        .convert_dir(dir)
        .with_context(|| format!("convert documents in {}", dir.display()))?;
    let archive = archive_name
        .map(|name| package(dir, &report.pdfs, name))
        .transpose()?;
    Ok(ConvertResult {
        dir: dir.to_path_buf(),
        report,
        archive,
    })
}
