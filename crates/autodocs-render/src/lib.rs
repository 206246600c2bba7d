//! Document output for autodocs.
//!
//! # Overview
//!
//! - **Templates**: [`DocxTemplate`] packages filled by a [`TemplateRenderer`]
//! - **Dispatch**: one document per record and selected template
//! - **Conversion**: `.docx` to PDF through a [`PdfConverter`]
//! - **Packaging**: zip archives and output directory housekeeping
//!
//! # Example
//!
//! ```ignore
//! use autodocs_render::{Dispatcher, DocxRenderer, DocxTemplate, TemplateSet};
//!
//! let templates = TemplateSet::new()
//!     .with(DocxTemplate::load(TemplateKind::BackBrace, "back.docx".as_ref())?);
//! let renderer = DocxRenderer::new();
//! let report = Dispatcher::new(&renderer, &templates, "out").dispatch(&records, &builder)?;
//! ```

pub mod archive;
pub mod convert;
pub mod dispatch;
pub mod docx;
pub mod error;
pub mod placeholder;
pub mod workdir;

pub use archive::{DEFAULT_ARCHIVE_NAME, write_archive, write_archive_files};
pub use convert::{
    ConversionReport, OfficeConverter, PdfConverter, default_office_binary, pdf_path,
};
pub use dispatch::{
    DOCUMENT_EXTENSION, DispatchReport, Dispatcher, GeneratedDocument, Progress,
};
pub use docx::{DOCUMENT_PART, DocxRenderer, DocxTemplate, TemplateRenderer, TemplateSet};
pub use error::{ArchiveError, ConvertError, DispatchError, RenderError, Result};
pub use placeholder::{UnknownNames, fill_placeholders, placeholder_names};
pub use workdir::{files_with_extension, prepare_output_dir};
