use std::path::PathBuf;
use std::time::Duration;

use autodocs_model::Workflow;
use autodocs_render::{ConversionReport, DispatchReport};

/// What happened to the PDF step of a generation run.
#[derive(Debug, Default)]
pub enum ConversionOutcome {
    #[default]
    NotRequested,
    /// Requested, but there were no documents to convert.
    Skipped,
    Converted(ConversionReport),
    Failed(String),
}

impl ConversionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn pdf_count(&self) -> usize {
        match self {
            Self::Converted(report) => report.pdfs.len(),
            _ => 0,
        }
    }
}

#[derive(Debug)]
pub struct GenerateResult {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub report: DispatchReport,
    /// Files removed from the output folder before generating.
    pub cleaned: usize,
    pub conversion: ConversionOutcome,
    pub archive: Option<PathBuf>,
    pub workflow: Workflow,
    pub duration: Duration,
}

impl GenerateResult {
    /// A document was skipped or conversion failed.
    pub fn has_errors(&self) -> bool {
        self.report.has_failures() || self.conversion.is_failed()
    }
}

#[derive(Debug)]
pub struct ConvertResult {
    pub dir: PathBuf,
    pub report: ConversionReport,
    pub archive: Option<PathBuf>,
}
