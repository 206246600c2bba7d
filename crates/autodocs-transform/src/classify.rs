//! Product code classification.
//!
//! The `Products` column is free text that may mix brace codes with other
//! billing codes (`"RKB BB, L0457"`). Classification is plain substring
//! membership on the upper-cased value, not tokenization.

use autodocs_model::{AvailableTemplates, Checkbox, TemplateAssignment, TemplateKind};
use serde::Serialize;

/// Markers that check the left limb box.
pub const LEFT_MARKERS: &[&str] = &["LKB", "LEFT"];
/// Markers that check the right limb box.
pub const RIGHT_MARKERS: &[&str] = &["RKB", "RIGHT"];
/// Bilateral marker; checks both boxes regardless of the side markers.
pub const BILATERAL_MARKERS: &[&str] = &["BKB"];
/// Markers selecting the back brace template. `L0457` is the HCPCS code.
pub const BACK_BRACE_MARKERS: &[&str] = &["BB", "L0457"];
/// Markers selecting the knee brace template. `L1833` is the HCPCS code.
pub const KNEE_BRACE_MARKERS: &[&str] = &["KB", "KNEE", "L1833", "BKB"];

/// Outcome of classifying one product string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Upper-cased, trimmed product string the rules ran against.
    pub products: String,
    pub left: Checkbox,
    pub right: Checkbox,
    /// Product string names a back brace.
    pub back_brace: bool,
    /// Product string names a knee brace.
    pub knee_brace: bool,
}

impl Classification {
    /// Templates to render, given which template handles were supplied.
    ///
    /// Back brace always comes before knee brace.
    pub fn assignments(&self, available: AvailableTemplates) -> Vec<TemplateAssignment> {
        TemplateKind::ALL
            .into_iter()
            .filter(|kind| available.has(*kind) && self.names(*kind))
            .map(TemplateAssignment::from)
            .collect()
    }

    /// Whether the product string selects this template kind.
    pub fn names(&self, kind: TemplateKind) -> bool {
        match kind {
            TemplateKind::BackBrace => self.back_brace,
            TemplateKind::KneeBrace => self.knee_brace,
        }
    }

    /// True when no template rule matched at all.
    pub fn is_miss(&self) -> bool {
        !self.back_brace && !self.knee_brace
    }
}

/// Classify a raw product string.
pub fn classify(products: &str) -> Classification {
    let normalized = products.trim().to_uppercase();

    let mut left = Checkbox::Unchecked;
    let mut right = Checkbox::Unchecked;
    if contains_any(&normalized, LEFT_MARKERS) {
        left = Checkbox::Checked;
    }
    if contains_any(&normalized, RIGHT_MARKERS) {
        right = Checkbox::Checked;
    }
    if contains_any(&normalized, BILATERAL_MARKERS) {
        left = Checkbox::Checked;
        right = Checkbox::Checked;
    }

    Classification {
        back_brace: contains_any(&normalized, BACK_BRACE_MARKERS),
        knee_brace: contains_any(&normalized, KNEE_BRACE_MARKERS),
        products: normalized,
        left,
        right,
    }
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    !haystack.is_empty() && markers.iter().any(|marker| haystack.contains(marker))
}
