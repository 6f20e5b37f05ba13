// logtriage/src/stages/investigator.rs
use crate::collaborators::{KnowledgeSearch, LanguageModel};
use crate::config::TriageConfig;
use crate::core::shared_state::SharedState;
use crate::core::stage::Stage;
use crate::error::TriageResult;
use crate::stages::prompts::{self, SYSTEM_INSTRUCTION};
use crate::stages::TriageStage;
use crate::state::{StageOutput, StageUpdate, TriageState};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Stage 2: looks up remediation knowledge for the analysis and has the model
/// reconcile it with the log evidence.
pub struct Investigator {
  search: Arc<dyn KnowledgeSearch>,
  model: Arc<dyn LanguageModel>,
  max_results: usize,
  query_char_limit: usize,
}

impl Investigator {
  pub fn new(search: Arc<dyn KnowledgeSearch>, model: Arc<dyn LanguageModel>, config: &TriageConfig) -> Self {
    Self {
      search,
      model,
      max_results: config.search_max_results,
      query_char_limit: config.query_char_limit,
    }
  }
}

#[async_trait]
impl TriageStage for Investigator {
  fn stage(&self) -> Stage {
    Stage::InvestigateIssue
  }

  #[instrument(name = "Investigator::execute", skip_all, fields(max_results = self.max_results))]
  async fn execute(&self, state: SharedState) -> TriageResult<StageUpdate> {
    let log_analysis = state.read_owned(TriageState::log_analysis)?;
    let mut messages = Vec::with_capacity(3);

    let query = prompts::search_query(&log_analysis, self.query_char_limit);
    info!(query_chars = query.chars().count(), "Searching for solutions based on log analysis online");
    messages.push("Searching for solutions based on log analysis online".to_string());
    let search_results = self.search.search(&query, self.max_results).await?;
    debug!(hits = search_results.len(), "Knowledge search returned.");

    info!("Summarizing investigation results with LLM");
    messages.push("Summarizing investigation results with LLM".to_string());
    let investigation = self
      .model
      .generate(
        SYSTEM_INSTRUCTION,
        &prompts::investigation_prompt(&log_analysis, &search_results),
      )
      .await?;

    info!("Investigation results summarized with LLM");
    messages.push("Investigation results summarized with LLM".to_string());
    Ok(StageUpdate::with_messages(
      StageOutput::InvestigationResults(investigation),
      messages,
    ))
  }
}
