//! Per-record context building.

use autodocs_model::columns;
use autodocs_model::{
    AvailableTemplates, GenerationOptions, HeightFormat, NormalizedContext, PatientRecord,
    TemplateAssignment, TemplateKind,
};
use serde::Serialize;

use crate::classify::{Classification, classify};
use crate::clock::{Clock, SystemClock, format_date};
use crate::normalization::{format_height, normalize_phone, trim_numeric_suffix};

/// First name component used when the dataset has no `Full Name` column.
pub const DEFAULT_FIRST_NAME: &str = "Patient";

/// Everything the dispatcher needs to know about one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPlan {
    pub row: usize,
    pub context: NormalizedContext,
    pub classification: Classification,
    first_name: String,
    last_name: String,
}

impl RecordPlan {
    /// Templates to render for this record.
    pub fn assignments(&self, available: AvailableTemplates) -> Vec<TemplateAssignment> {
        self.classification.assignments(available)
    }

    /// Output file name without extension: `{first}_{last}_{suffix}`.
    pub fn file_stem(&self, kind: TemplateKind) -> String {
        format!("{}_{}_{}", self.first_name, self.last_name, kind.suffix())
    }

    /// Human-readable name for progress output.
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Builds [`NormalizedContext`] values from patient records.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder<C = SystemClock> {
    clock: C,
    height_format: HeightFormat,
}

impl<C: Clock> ContextBuilder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            height_format: HeightFormat::default(),
        }
    }

    /// Builder configured from run options.
    pub fn with_options(clock: C, options: &GenerationOptions) -> Self {
        Self::new(clock).with_height_format(options.height_format)
    }

    #[must_use]
    pub fn with_height_format(mut self, format: HeightFormat) -> Self {
        self.height_format = format;
        self
    }

    pub fn height_format(&self) -> HeightFormat {
        self.height_format
    }

    /// Classify and normalize one record.
    pub fn build(&self, record: &PatientRecord) -> RecordPlan {
        let classification = classify(&record.text(columns::PRODUCTS));
        let context = self.context_with(record, &classification);

        let first_name = if record.contains(columns::FULL_NAME) {
            name_component(&record.text(columns::FULL_NAME))
        } else {
            DEFAULT_FIRST_NAME.to_string()
        };
        let last_name = name_component(&record.text(columns::LAST_NAME));

        tracing::trace!(
            row = record.row,
            back_brace = classification.back_brace,
            knee_brace = classification.knee_brace,
            "record classified"
        );

        RecordPlan {
            row: record.row,
            context,
            classification,
            first_name,
            last_name,
        }
    }

    /// The normalized context alone.
    pub fn context(&self, record: &PatientRecord) -> NormalizedContext {
        let classification = classify(&record.text(columns::PRODUCTS));
        self.context_with(record, &classification)
    }

    fn context_with(
        &self,
        record: &PatientRecord,
        classification: &Classification,
    ) -> NormalizedContext {
        let text = |column: &str| record.text(column);
        let number = |column: &str| trim_numeric_suffix(&record.text(column));

        NormalizedContext {
            date: format_date(self.clock.today()),
            first_name: text(columns::FULL_NAME),
            last_name: text(columns::LAST_NAME),
            dob: text(columns::DATE_OF_BIRTH),
            address: text(columns::ADDRESS),
            city: text(columns::CITY),
            state: text(columns::STATE),
            zip: number(columns::ZIP_CODE),
            phone: normalize_phone(&record.text(columns::PRIMARY_PHONE)),
            weight: number(columns::WEIGHT),
            height: format_height(&record.text(columns::HEIGHT), self.height_format),
            insurance: text(columns::PRIMARY_INSURANCE),
            policy_num: number(columns::MCN),
            dr_name: text(columns::DR_NAME),
            dr_npi: number(columns::NPI),
            dr_address: text(columns::DR_ADDRESS),
            dr_city: text(columns::DR_CITY),
            dr_state: text(columns::DR_STATE),
            dr_zip: number(columns::DR_ZIP_CODE),
            dr_phone: number(columns::DR_PHONE),
            dr_fax: number(columns::DR_FAX),
            left: classification.left.glyph().to_string(),
            right: classification.right.glyph().to_string(),
        }
    }
}

/// Trimmed name with path separators replaced, safe to embed in a file name.
fn name_component(value: &str) -> String {
    value.trim().replace(['/', '\\'], "-")
}
