//! Batch document generation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use autodocs_model::{FailurePolicy, PatientRecord, TemplateKind};
use autodocs_transform::{Clock, ContextBuilder, RecordPlan};

use crate::docx::{DocxTemplate, TemplateRenderer, TemplateSet};
use crate::error::DispatchError;

/// Extension of every generated document.
pub const DOCUMENT_EXTENSION: &str = "docx";

/// Per-record progress notification.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Zero-based record index.
    pub index: usize,
    pub total: usize,
    /// `first last` of the record being processed.
    pub name: &'a str,
}

/// One file written by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub path: PathBuf,
    pub kind: TemplateKind,
    pub row: usize,
}

/// Outcome of a dispatch run.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Records looked at.
    pub records: usize,
    /// Documents written, in generation order.
    pub documents: Vec<GeneratedDocument>,
    /// Records whose products selected no available template.
    pub unmatched: usize,
    /// Documents that replaced one written earlier in the same run.
    pub overwritten: usize,
    /// Failures skipped under [`FailurePolicy::Continue`].
    pub failures: Vec<DispatchError>,
}

impl DispatchReport {
    pub fn documents_of(&self, kind: TemplateKind) -> usize {
        self.documents.iter().filter(|doc| doc.kind == kind).count()
    }

    /// Records that produced at least one document.
    pub fn matched(&self) -> usize {
        self.records - self.unmatched
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Distinct files written by this run, in generation order.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter(|doc| seen.insert(doc.path.as_path()))
            .map(|doc| doc.path.clone())
            .collect()
    }
}

/// Renders every record into its assigned templates.
pub struct Dispatcher<'a, R: ?Sized> {
    renderer: &'a R,
    templates: &'a TemplateSet,
    output_dir: PathBuf,
    policy: FailurePolicy,
}

impl<'a, R: TemplateRenderer + ?Sized> Dispatcher<'a, R> {
    pub fn new(renderer: &'a R, templates: &'a TemplateSet, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            templates,
            output_dir: output_dir.into(),
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate documents for every record.
    pub fn dispatch<C: Clock>(
        &self,
        records: &[PatientRecord],
        builder: &ContextBuilder<C>,
    ) -> Result<DispatchReport, DispatchError> {
        self.dispatch_with_progress(records, builder, |_| {})
    }

    /// Generate documents, calling `progress` before each record.
    pub fn dispatch_with_progress<C, F>(
        &self,
        records: &[PatientRecord],
        builder: &ContextBuilder<C>,
        mut progress: F,
    ) -> Result<DispatchReport, DispatchError>
    where
        C: Clock,
        F: FnMut(Progress<'_>),
    {
        let total = records.len();
        let available = self.templates.available();
        let mut report = DispatchReport::default();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            let plan = builder.build(record);
            let name = plan.display_name();
            progress(Progress {
                index,
                total,
                name: &name,
            });

            let span = tracing::debug_span!("record", row = record.row);
            let _guard = span.enter();
            report.records += 1;

            let assignments = plan.assignments(available);
            if assignments.is_empty() {
                report.unmatched += 1;
                tracing::info!(
                    row = record.row,
                    products = %plan.classification.products,
                    "no template matched"
                );
                continue;
            }

            for assignment in assignments {
                let Some(template) = self.templates.get(assignment.kind) else {
                    continue;
                };
                match self.write_document(template, &plan) {
                    Ok(document) => {
                        if !written.insert(document.path.clone()) {
                            report.overwritten += 1;
                            tracing::warn!(
                                row = record.row,
                                kind = %document.kind,
                                "overwrote a document written earlier in this run"
                            );
                        }
                        report.documents.push(document);
                    }
                    Err(err) => match self.policy {
                        FailurePolicy::Abort => return Err(err),
                        FailurePolicy::Continue => {
                            tracing::warn!(
                                row = err.row(),
                                kind = %err.kind(),
                                error = %err,
                                "document skipped"
                            );
                            report.failures.push(err);
                        }
                    },
                }
            }
        }

        tracing::info!(
            records = report.records,
            documents = report.documents.len(),
            unmatched = report.unmatched,
            failures = report.failures.len(),
            "dispatch complete"
        );
        Ok(report)
    }

    fn write_document(
        &self,
        template: &DocxTemplate,
        plan: &RecordPlan,
    ) -> Result<GeneratedDocument, DispatchError> {
        let kind = template.kind();
        let bytes = self
            .renderer
            .render(template, &plan.context)
            .map_err(|source| DispatchError::Render {
                row: plan.row,
                kind,
                source,
            })?;

        let path = self.output_dir.join(format!(
            "{}.{DOCUMENT_EXTENSION}",
            plan.file_stem(kind)
        ));
        if path.exists() {
            tracing::debug!(row = plan.row, %kind, "replacing document from an earlier run");
        }
        std::fs::write(&path, bytes).map_err(|source| DispatchError::Write {
            row: plan.row,
            kind,
            path: path.clone(),
            source,
        })?;
        tracing::debug!(row = plan.row, %kind, "document written");

        Ok(GeneratedDocument {
            path,
            kind,
            row: plan.row,
        })
    }
}
