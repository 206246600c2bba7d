//! Data model for autodocs: patient records, document contexts, templates.

pub mod columns;
pub mod context;
pub mod error;
pub mod options;
pub mod record;
pub mod template;
pub mod value;
pub mod workflow;

pub use context::{FIELD_NAMES, NormalizedContext};
pub use error::{ModelError, Result};
pub use options::{FailurePolicy, GenerationOptions, HeightFormat};
pub use record::{Dataset, PatientRecord};
pub use template::{AvailableTemplates, Checkbox, TemplateAssignment, TemplateKind};
pub use value::{CellValue, format_float};
pub use workflow::{Workflow, WorkflowStep};
