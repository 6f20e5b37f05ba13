// logtriage/src/stages/log_analyzer.rs
use crate::collaborators::{LanguageModel, LogSource};
use crate::core::shared_state::SharedState;
use crate::core::stage::Stage;
use crate::error::TriageResult;
use crate::stages::prompts::{self, SYSTEM_INSTRUCTION};
use crate::stages::TriageStage;
use crate::state::{StageOutput, StageUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Stage 1: reads the log file and asks the model what went wrong.
pub struct LogAnalyzer {
  log_source: Arc<dyn LogSource>,
  model: Arc<dyn LanguageModel>,
}

impl LogAnalyzer {
  pub fn new(log_source: Arc<dyn LogSource>, model: Arc<dyn LanguageModel>) -> Self {
    Self { log_source, model }
  }
}

#[async_trait]
impl TriageStage for LogAnalyzer {
  fn stage(&self) -> Stage {
    Stage::AnalyzeLogs
  }

  #[instrument(name = "LogAnalyzer::execute", skip_all)]
  async fn execute(&self, state: SharedState) -> TriageResult<StageUpdate> {
    let log_file_path = state.read().log_file_path().to_owned();
    let mut messages = Vec::with_capacity(3);

    info!(%log_file_path, "Reading log file");
    messages.push(format!("Reading log file {}", log_file_path));
    let logs = self.log_source.read(&log_file_path).await?;

    info!(log_bytes = logs.len(), "Analyzing logs with LLM");
    messages.push("Analyzing logs with LLM".to_string());
    let analysis = self
      .model
      .generate(SYSTEM_INSTRUCTION, &prompts::log_analysis_prompt(&logs))
      .await?;

    info!("Log analyzed with LLM");
    messages.push("Log analyzed with LLM".to_string());
    Ok(StageUpdate::with_messages(StageOutput::LogAnalysis(analysis), messages))
  }
}
