//! Pipeline error types.
//!
//! Two kinds of failure can surface from the orchestrator:
//!
//! - [`PipelineError::MissingStage`] — a precondition violation: a stage was
//!   requested before the stage it depends on had run. The orchestrator
//!   fails fast and names the missing stage.
//! - [`PipelineError::Capability`] — an internal failure of one of the
//!   annotation capabilities (tagger, parser, analyzer, ...). The
//!   orchestrator surfaces these unmodified; it performs no retry and no
//!   recovery.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Stage;

/// A failure raised by or through the pipeline orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineError {
    /// A stage ran before its inputs existed.
    #[error("precondition violation: '{required}' has not run (sentence is at '{found}')")]
    MissingStage { required: Stage, found: Stage },

    /// An annotation capability failed internally.
    #[error("{stage} failed: {message}")]
    Capability { stage: String, message: String },
}

impl PipelineError {
    /// Create a precondition-violation error naming the missing stage.
    pub fn missing_stage(required: Stage, found: Stage) -> Self {
        Self::MissingStage { required, found }
    }

    /// Create a capability-failure error for the named stage.
    pub fn capability(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Capability {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// True if this error is a precondition violation rather than a
    /// capability failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingStage { .. })
    }
}
