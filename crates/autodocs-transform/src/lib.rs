//! Record transformation for autodocs.
//!
//! Turns a raw [`PatientRecord`](autodocs_model::PatientRecord) into the
//! context a document template is filled with.
//!
//! # Overview
//!
//! - **Normalization**: numeric-suffix trimming, decimal formatting, phone cleanup
//! - **Classification**: which templates a `Products` value selects, and which
//!   limb checkboxes it sets
//! - **Context building**: the full placeholder mapping for one record
//!
//! # Example
//!
//! ```ignore
//! use autodocs_transform::{ContextBuilder, FixedClock};
//!
//! let builder = ContextBuilder::new(FixedClock::parse("01/06/2025")?);
//! let plan = builder.build(&record);
//! for assignment in plan.assignments(AvailableTemplates::BOTH) {
//!     println!("{}", plan.file_stem(assignment.kind));
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Total**: every context carries every placeholder, empty when unknown
//! - **Deterministic**: identical record and clock give identical output
//! - **Infallible normalization**: unparseable values pass through

mod classify;
mod clock;
mod context;
mod error;

pub mod normalization;

pub use classify::{
    BACK_BRACE_MARKERS, BILATERAL_MARKERS, Classification, KNEE_BRACE_MARKERS, LEFT_MARKERS,
    RIGHT_MARKERS, classify,
};
pub use clock::{Clock, DATE_FORMAT, FixedClock, SystemClock, format_date};
pub use context::{ContextBuilder, DEFAULT_FIRST_NAME, RecordPlan};
pub use error::{Result, TransformError};
pub use normalization::{format_as_decimal, format_height, normalize_phone, trim_numeric_suffix};
