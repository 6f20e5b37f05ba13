// logtriage/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, which drives the phase machine
//! through every stage in order.

use crate::core::phase::Phase;
use crate::core::shared_state::SharedState;
use crate::error::{TriageError, TriageResult};
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl Pipeline {
  /// Executes every stage against the shared state `state`.
  ///
  /// Each stage is checked against the phase machine, invoked once, and its
  /// update merged before the next stage starts. The first failure ends the
  /// run and comes back as `TriageError::PipelineExecution` naming the stage.
  /// Outputs merged before the failure stay in `state`.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(num_stages = self.stages.len()),
        err(Display)
    )]
  pub async fn run(&self, state: SharedState) -> TriageResult<Phase> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut phase = state.read().phase();

    for (stage_idx, stage) in self.stages.iter().copied().enumerate() {
      let stage_span = span!(
        Level::INFO,
        "pipeline_stage_execution",
        stage = stage.name(),
        stage_index = stage_idx
      );

      // Only the successor of the current phase may run; this also refuses
      // a state whose fields were populated before the run started.
      if phase.next_stage() != Some(stage) {
        let err = TriageError::InvalidTransition {
          from: phase,
          to: stage.completes_to(),
        };
        stage_span.in_scope(|| event!(Level::ERROR, error = %err, "Stage invoked out of order."));
        return Err(err.in_stage(stage));
      }

      let handler = match self.handlers.get(&stage) {
        Some(handler) => handler,
        None => {
          stage_span.in_scope(|| event!(Level::ERROR, "Stage has no handler."));
          return Err(TriageError::MissingStageHandler { stage }.in_stage(stage));
        }
      };

      let messages_before = state.read().messages().len();
      let update = match handler(state.clone()).instrument(stage_span.clone()).await {
        Ok(update) => update,
        Err(e) => {
          stage_span.in_scope(|| event!(Level::ERROR, error = %e, "Stage handler failed."));
          return Err(e.in_stage(stage));
        }
      };

      phase = stage_span.in_scope(|| {
        if update.output.field() != stage.produces() {
          let err = TriageError::StateConsistency {
            field: update.output.field(),
            reason: format!("stage '{}' may only produce '{}'", stage, stage.produces()),
          };
          event!(Level::ERROR, error = %err, "Stage returned a foreign output.");
          return Err(err.in_stage(stage));
        }
        if let Err(e) = state.merge(update) {
          event!(Level::ERROR, error = %e, "Merging stage output failed.");
          return Err(e.in_stage(stage));
        }
        let next = match phase.advance(stage) {
          Ok(next) => next,
          Err(e) => return Err(e.in_stage(stage)),
        };
        event!(
          Level::DEBUG,
          phase = %next,
          appended_messages = state.read().messages().len() - messages_before,
          "Stage processing finished successfully."
        );
        Ok(next)
      })?;
    } // End of loop over stages

    let phase = phase.finalize()?;
    event!(Level::DEBUG, %phase, "Pipeline execution completed successfully.");
    Ok(phase)
  }
}
