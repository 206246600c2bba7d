//! PDF conversion through an office suite running headless.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::dispatch::DOCUMENT_EXTENSION;
use crate::error::ConvertError;
use crate::workdir::files_with_extension;

/// Turns `.docx` documents into PDFs.
pub trait PdfConverter {
    /// Convert exactly `documents`, writing the PDFs into `out_dir`.
    fn convert(
        &self,
        documents: &[PathBuf],
        out_dir: &Path,
    ) -> Result<ConversionReport, ConvertError>;

    /// Convert every `.docx` in `dir`, writing the PDFs beside them.
    fn convert_dir(&self, dir: &Path) -> Result<ConversionReport, ConvertError> {
        let inputs = files_with_extension(dir, DOCUMENT_EXTENSION)?;
        if inputs.is_empty() {
            return Err(ConvertError::NoInputs {
                dir: dir.to_path_buf(),
            });
        }
        self.convert(&inputs, dir)
    }
}

/// Where the converter leaves the PDF for `document`.
pub fn pdf_path(document: &Path, out_dir: &Path) -> PathBuf {
    let stem = document.file_stem().unwrap_or(document.as_os_str());
    out_dir.join(stem).with_extension("pdf")
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// PDFs produced for the converted documents, sorted by name.
    pub pdfs: Vec<PathBuf>,
    /// Converter stderr, when it printed anything.
    pub diagnostic: Option<String>,
}

/// Platform default for the LibreOffice executable.
pub fn default_office_binary() -> &'static str {
    if cfg!(windows) { "soffice" } else { "libreoffice" }
}

/// Runs LibreOffice (`--headless --convert-to pdf`).
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    binary: PathBuf,
    extra_args: Vec<OsString>,
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new(default_office_binary())
    }
}

impl OfficeConverter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed before the conversion flags, such as
    /// `-env:UserInstallation=file:///tmp/profile`.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl PdfConverter for OfficeConverter {
    fn convert(
        &self,
        documents: &[PathBuf],
        out_dir: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        if documents.is_empty() {
            return Err(ConvertError::NoInputs {
                dir: out_dir.to_path_buf(),
            });
        }

        tracing::info!(
            binary = %self.binary.display(),
            documents = documents.len(),
            "converting documents to PDF"
        );
        let output = Command::new(&self.binary)
            .args(&self.extra_args)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(out_dir)
            .args(documents)
            .output()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ConvertError::ConverterMissing {
                        binary: self.binary.clone(),
                    }
                } else {
                    ConvertError::Launch {
                        binary: self.binary.clone(),
                        source,
                    }
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            tracing::error!(status = %output.status, stderr = %stderr, "converter failed");
            return Err(ConvertError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }
        let diagnostic = (!stderr.is_empty()).then_some(stderr);

        let mut pdfs: Vec<PathBuf> = documents
            .iter()
            .map(|document| pdf_path(document, out_dir))
            .filter(|pdf| pdf.is_file())
            .collect();
        pdfs.sort();
        if pdfs.is_empty() {
            return Err(ConvertError::NoOutput {
                dir: out_dir.to_path_buf(),
                diagnostic,
            });
        }
        if pdfs.len() < documents.len() {
            tracing::warn!(
                documents = documents.len(),
                pdfs = pdfs.len(),
                "some documents were not converted"
            );
        }

        Ok(ConversionReport { pdfs, diagnostic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binary() {
        let converter = OfficeConverter::default();
        assert_eq!(converter.binary(), Path::new(default_office_binary()));
    }

    #[test]
    fn test_pdf_path_uses_document_stem() {
        let pdf = pdf_path(Path::new("/data/in/Jane_Doe_Back_Brace.docx"), Path::new("/out"));
        assert_eq!(pdf, Path::new("/out/Jane_Doe_Back_Brace.pdf"));
    }

    #[test]
    fn test_no_documents_has_no_inputs() {
        let result = OfficeConverter::default().convert(&[], Path::new("out"));
        assert!(matches!(result, Err(ConvertError::NoInputs { .. })));
    }

    #[test]
    fn test_empty_dir_has_no_inputs() {
        let temp = tempfile::tempdir().unwrap();
        let result = OfficeConverter::default().convert_dir(temp.path());
        assert!(matches!(result, Err(ConvertError::NoInputs { .. })));
    }
}
