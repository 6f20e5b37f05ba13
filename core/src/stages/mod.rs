// logtriage/src/stages/mod.rs

//! The three stage implementations and the trait the pipeline runs them through.

use crate::core::shared_state::SharedState;
use crate::core::stage::Stage;
use crate::error::TriageResult;
use crate::state::StageUpdate;
use async_trait::async_trait;

pub mod investigator;
pub mod log_analyzer;
pub mod prompts;
pub mod solution_specialist;

pub use investigator::Investigator;
pub use log_analyzer::LogAnalyzer;
pub use solution_specialist::SolutionSpecialist;

/// A stage implementation that can be plugged into a [`crate::Pipeline`].
///
/// `execute` must not write to the state. It reads its inputs, calls its
/// collaborators, and returns the update for the pipeline to merge.
#[async_trait]
pub trait TriageStage: Send + Sync {
  /// Which pipeline stage this implementation fills.
  fn stage(&self) -> Stage;

  async fn execute(&self, state: SharedState) -> TriageResult<StageUpdate>;
}
