//! Progress through the upload, generate and finish stages.
//!
//! The state is an ordinary value owned by the caller and handed from one
//! pipeline stage to the next.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum WorkflowStep {
    #[default]
    Upload,
    Generate,
    Finish,
}

impl WorkflowStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Generate => "Generate",
            Self::Finish => "Finish",
        }
    }

    /// 1-based position, as shown to users.
    pub const fn number(self) -> u8 {
        match self {
            Self::Upload => 1,
            Self::Generate => 2,
            Self::Finish => 3,
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    step: WorkflowStep,
    documents: usize,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    /// Documents produced by the last generation run.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Note a finished generation run. Only a run that produced documents
    /// moves the workflow on; an empty run leaves it where it was.
    pub fn record_generation(&mut self, documents: usize) -> WorkflowStep {
        self.documents = documents;
        if documents > 0 {
            self.step = WorkflowStep::Generate;
        }
        self.step
    }

    /// Note a conversion attempt. Conversion needs generated documents.
    pub fn record_conversion(&mut self, success: bool) -> Result<WorkflowStep> {
        if self.step == WorkflowStep::Upload {
            return Err(ModelError::InvalidTransition {
                from: WorkflowStep::Upload.label(),
                to: WorkflowStep::Finish.label(),
            });
        }
        if success {
            self.step = WorkflowStep::Finish;
        }
        Ok(self.step)
    }

    pub fn is_ready_for_conversion(&self) -> bool {
        self.step >= WorkflowStep::Generate
    }
}
