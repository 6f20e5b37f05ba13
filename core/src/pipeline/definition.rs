// logtriage/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and its construction.

use crate::core::handler::StageHandler;
use crate::core::stage::Stage;
use std::collections::HashMap;

/// The fixed, linear triage pipeline.
///
/// Stages always run in [`Stage::ALL`] order, each exactly once. Every stage
/// needs a handler registered through [`Pipeline::on_stage`] (or
/// [`Pipeline::with_stage`]) before [`Pipeline::run`] is called.
pub struct Pipeline {
  /// Ordered list of stages for this pipeline.
  pub(crate) stages: Vec<Stage>,

  pub(crate) handlers: HashMap<Stage, StageHandler>,
}

impl Pipeline {
  pub fn new() -> Self {
    Self {
      stages: Stage::ALL.to_vec(),
      handlers: HashMap::new(),
    }
  }

  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  pub fn has_handler(&self, stage: Stage) -> bool {
    self.handlers.contains_key(&stage)
  }

  /// Panics if `stage` already has a handler.
  /// Used internally before registering one.
  pub(crate) fn ensure_no_handler(&self, stage: Stage) {
    if self.handlers.contains_key(&stage) {
      // Programming error (double registration), not a TriageError.
      panic!("Triage setup error: stage '{}' already has a handler.", stage);
    }
  }
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::new()
  }
}
