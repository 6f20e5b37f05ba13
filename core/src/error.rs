// logtriage/src/error.rs
use crate::core::phase::Phase;
use crate::core::stage::Stage;
use crate::state::StateField;
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
  #[error("Log file not found within permitted root: {path}")]
  LogNotFound { path: String },

  #[error("Failed to read log file '{path}'. Source: {source}")]
  LogRead {
    path: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Knowledge search unavailable. Source: {source}")]
  SearchUnavailable {
    #[source]
    source: AnyhowError,
  },

  #[error("Language model invocation failed. Source: {source}")]
  ModelInvocation {
    #[source]
    source: AnyhowError,
  },

  #[error("State field '{field}' was read before the stage producing it ran")]
  StateNotReady { field: StateField },

  #[error("Inconsistent merge into state field '{field}': {reason}")]
  StateConsistency { field: StateField, reason: String },

  #[error("No transition from phase '{from}' to phase '{to}'")]
  InvalidTransition { from: Phase, to: Phase },

  #[error("No handler registered for stage '{stage}'")]
  MissingStageHandler { stage: Stage },

  #[error("Configuration error for '{key}': {message}")]
  Configuration { key: String, message: String },

  #[error("Error in collaborator or external operation. Source: {source}")]
  Collaborator {
    #[source]
    source: AnyhowError,
  },

  #[error("Pipeline failed at stage '{stage}'. Source: {source}")]
  PipelineExecution {
    stage: Stage,
    #[source]
    source: Box<TriageError>,
  },
}

impl TriageError {
  /// Wraps a stage failure with the stage it came from.
  /// An error that is already a `PipelineExecution` is returned as is.
  pub fn in_stage(self, stage: Stage) -> Self {
    match self {
      already @ TriageError::PipelineExecution { .. } => already,
      other => TriageError::PipelineExecution {
        stage,
        source: Box::new(other),
      },
    }
  }

  /// The failing stage, for `PipelineExecution` errors.
  pub fn stage(&self) -> Option<Stage> {
    match self {
      TriageError::PipelineExecution { stage, .. } => Some(*stage),
      _ => None,
    }
  }

  /// The originating error underneath any `PipelineExecution` wrapper.
  pub fn root_cause(&self) -> &TriageError {
    match self {
      TriageError::PipelineExecution { source, .. } => source.root_cause(),
      other => other,
    }
  }
}

// Collaborators may hand back a TriageError inside an anyhow::Error; unwrap it
// instead of nesting it under `Collaborator`.
impl From<AnyhowError> for TriageError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<TriageError>() {
      Ok(triage_err) => triage_err,
      Err(source) => TriageError::Collaborator { source },
    }
  }
}

pub type TriageResult<T, E = TriageError> = std::result::Result<T, E>;
