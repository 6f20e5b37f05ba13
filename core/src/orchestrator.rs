// logtriage/src/orchestrator.rs

//! The single entry point of the crate: wires the three stages into a
//! [`Pipeline`] and runs it for a log file.

use crate::collaborators::Collaborators;
use crate::config::TriageConfig;
use crate::core::shared_state::SharedState;
use crate::error::TriageResult;
use crate::pipeline::definition::Pipeline;
use crate::stages::{Investigator, LogAnalyzer, SolutionSpecialist};
use crate::state::TriageState;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub struct Orchestrator {
  pipeline: Pipeline,
  config: Arc<TriageConfig>,
}

impl Orchestrator {
  /// Builds the standard pipeline: `LogAnalyzer`, `Investigator`, `SolutionSpecialist`.
  pub fn new(collaborators: Collaborators, config: TriageConfig) -> Self {
    let Collaborators {
      log_source,
      search,
      model,
    } = collaborators;

    let mut pipeline = Pipeline::new();
    pipeline
      .with_stage(Arc::new(LogAnalyzer::new(log_source, model.clone())))
      .with_stage(Arc::new(Investigator::new(search, model.clone(), &config)))
      .with_stage(Arc::new(SolutionSpecialist::new(model)));

    Self::from_pipeline(pipeline, config)
  }

  /// Runs a caller-assembled pipeline instead of the standard one.
  pub fn from_pipeline(pipeline: Pipeline, config: TriageConfig) -> Self {
    Self {
      pipeline,
      config: Arc::new(config),
    }
  }

  pub fn config(&self) -> &TriageConfig {
    &self.config
  }

  pub fn pipeline(&self) -> &Pipeline {
    &self.pipeline
  }

  /// Triage one log file.
  ///
  /// Returns the fully populated state, or `TriageError::PipelineExecution`
  /// naming the first stage that failed. There is no partial result.
  #[instrument(name = "Orchestrator::run", skip(self), err(Display))]
  pub async fn run(&self, log_file_path: &str) -> TriageResult<TriageState> {
    event!(Level::INFO, "Starting triage run.");
    let state = SharedState::for_log(log_file_path);
    let phase = self.pipeline.run(state.clone()).await?;

    let final_state = state.into_inner();
    event!(
      Level::INFO,
      %phase,
      messages = final_state.messages().len(),
      "Triage run finished."
    );
    Ok(final_state)
  }

  /// Triage several log files. Every run owns its own state and the runs
  /// proceed concurrently; results come back in input order.
  pub async fn run_all<S: AsRef<str>>(&self, log_file_paths: &[S]) -> Vec<TriageResult<TriageState>> {
    join_all(log_file_paths.iter().map(|path| self.run(path.as_ref()))).await
  }
}
