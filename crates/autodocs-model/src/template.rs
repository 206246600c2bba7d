//! Template categories and checkbox glyphs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two fixed document kinds a record can be rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    BackBrace,
    KneeBrace,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::BackBrace, TemplateKind::KneeBrace];

    /// Suffix appended to generated file names.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::BackBrace => "Back_Brace",
            Self::KneeBrace => "Knee_Brace",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BackBrace => "Back Brace",
            Self::KneeBrace => "Knee Brace",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A template selected for one record, with the file-name suffix it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateAssignment {
    pub kind: TemplateKind,
    pub suffix: &'static str,
}

impl From<TemplateKind> for TemplateAssignment {
    fn from(kind: TemplateKind) -> Self {
        Self {
            kind,
            suffix: kind.suffix(),
        }
    }
}

/// Which template handles the caller supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailableTemplates {
    pub back_brace: bool,
    pub knee_brace: bool,
}

impl AvailableTemplates {
    pub const BOTH: Self = Self {
        back_brace: true,
        knee_brace: true,
    };

    pub fn has(self, kind: TemplateKind) -> bool {
        match kind {
            TemplateKind::BackBrace => self.back_brace,
            TemplateKind::KneeBrace => self.knee_brace,
        }
    }

    pub fn any(self) -> bool {
        self.back_brace || self.knee_brace
    }
}

/// Left/right limb checkbox state as rendered in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Checkbox {
    Checked,
    #[default]
    Unchecked,
}

impl Checkbox {
    pub const CHECKED_GLYPH: &'static str = "☑";
    pub const UNCHECKED_GLYPH: &'static str = "☐";

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Checked => Self::CHECKED_GLYPH,
            Self::Unchecked => Self::UNCHECKED_GLYPH,
        }
    }

    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

impl fmt::Display for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        assert_eq!(TemplateKind::BackBrace.suffix(), "Back_Brace");
        assert_eq!(TemplateKind::KneeBrace.suffix(), "Knee_Brace");
    }

    #[test]
    fn checkbox_glyphs() {
        assert_eq!(Checkbox::Checked.glyph(), "☑");
        assert_eq!(Checkbox::Unchecked.to_string(), "☐");
        assert_eq!(Checkbox::default(), Checkbox::Unchecked);
    }

    #[test]
    fn availability() {
        let only_knee = AvailableTemplates {
            back_brace: false,
            knee_brace: true,
        };
        assert!(only_knee.any());
        assert!(!only_knee.has(TemplateKind::BackBrace));
        assert!(!AvailableTemplates::default().any());
    }
}
