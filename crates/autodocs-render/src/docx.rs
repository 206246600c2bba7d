//! DOCX templates and the renderer that fills them.

use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use autodocs_model::{AvailableTemplates, NormalizedContext, TemplateKind};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{RenderError, Result};
use crate::placeholder::{UnknownNames, fill_placeholders, placeholder_names};

/// Main body part every WordprocessingML package carries.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// A `.docx` package held in memory.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    kind: TemplateKind,
    name: String,
    bytes: Vec<u8>,
}

impl DocxTemplate {
    /// Load a template from disk.
    pub fn load(kind: TemplateKind, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| RenderError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(kind, name, bytes)
    }

    /// Wrap raw package bytes, checking they form a DOCX.
    pub fn from_bytes(kind: TemplateKind, name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).map_err(|e| {
            RenderError::InvalidTemplate {
                name: name.clone(),
                reason: format!("not a zip package ({e})"),
            }
        })?;
        if !archive.file_names().any(|entry| entry == DOCUMENT_PART) {
            return Err(RenderError::InvalidTemplate {
                name,
                reason: format!("missing {DOCUMENT_PART}"),
            });
        }
        tracing::debug!(%kind, template = %name, entries = archive.len(), "template loaded");
        Ok(Self { kind, name, bytes })
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Placeholder names in the text parts that no record context defines,
    /// sorted and deduplicated.
    pub fn unknown_placeholders(&self) -> Result<Vec<String>> {
        let known = NormalizedContext::default();
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut unknown = BTreeSet::new();
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            if !is_text_part(&name) {
                continue;
            }
            let mut xml = String::new();
            entry
                .read_to_string(&mut xml)
                .map_err(|_| RenderError::InvalidEncoding { part: name })?;
            unknown.extend(
                placeholder_names(&xml)
                    .into_iter()
                    .filter(|placeholder| known.get(placeholder).is_none()),
            );
        }
        Ok(unknown.into_iter().collect())
    }
}

/// The optional back brace and knee brace templates for a run.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    back_brace: Option<DocxTemplate>,
    knee_brace: Option<DocxTemplate>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, replacing any previous one of the same kind.
    #[must_use]
    pub fn with(mut self, template: DocxTemplate) -> Self {
        self.insert(template);
        self
    }

    pub fn insert(&mut self, template: DocxTemplate) {
        match template.kind() {
            TemplateKind::BackBrace => self.back_brace = Some(template),
            TemplateKind::KneeBrace => self.knee_brace = Some(template),
        }
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&DocxTemplate> {
        match kind {
            TemplateKind::BackBrace => self.back_brace.as_ref(),
            TemplateKind::KneeBrace => self.knee_brace.as_ref(),
        }
    }

    pub fn available(&self) -> AvailableTemplates {
        AvailableTemplates {
            back_brace: self.back_brace.is_some(),
            knee_brace: self.knee_brace.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.available().any()
    }
}

/// Fills a template with one record's context.
pub trait TemplateRenderer {
    /// Returns the bytes of the filled document.
    fn render(&self, template: &DocxTemplate, context: &NormalizedContext) -> Result<Vec<u8>>;
}

/// Renders `{{ name }}` placeholders in the body, headers and footers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer {
    unknown: UnknownNames,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on placeholders the context does not define instead of leaving
    /// them blank.
    #[must_use]
    pub fn with_strict_placeholders(mut self, strict: bool) -> Self {
        self.unknown = if strict {
            UnknownNames::Reject
        } else {
            UnknownNames::Empty
        };
        self
    }

    pub fn is_strict(&self) -> bool {
        self.unknown == UnknownNames::Reject
    }
}

impl TemplateRenderer for DocxRenderer {
    fn render(&self, template: &DocxTemplate, context: &NormalizedContext) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(template.bytes()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(template.bytes().len())));

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            if !is_text_part(&name) {
                writer.raw_copy_file(entry)?;
                continue;
            }

            let mut raw = Vec::new();
            entry.read_to_end(&mut raw)?;
            let xml = String::from_utf8(raw)
                .map_err(|_| RenderError::InvalidEncoding { part: name.clone() })?;
            let filled = fill_placeholders(&xml, &name, context, self.unknown)?;

            let options = SimpleFileOptions::default().compression_method(entry.compression());
            writer.start_file(name, options)?;
            writer.write_all(filled.as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Parts that may hold visible placeholder text.
fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    name.strip_prefix("word/")
        .filter(|rest| !rest.contains('/') && rest.ends_with(".xml"))
        .is_some_and(|rest| rest.starts_with("header") || rest.starts_with("footer"))
}
