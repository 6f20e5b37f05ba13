// logtriage/src/stages/solution_specialist.rs
use crate::collaborators::LanguageModel;
use crate::core::shared_state::SharedState;
use crate::core::stage::Stage;
use crate::error::TriageResult;
use crate::stages::prompts::{self, SYSTEM_INSTRUCTION};
use crate::stages::TriageStage;
use crate::state::{StageOutput, StageUpdate, TriageState};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Stage 3: writes the remediation plan, the terminal artifact of a run.
pub struct SolutionSpecialist {
  model: Arc<dyn LanguageModel>,
}

impl SolutionSpecialist {
  pub fn new(model: Arc<dyn LanguageModel>) -> Self {
    Self { model }
  }
}

#[async_trait]
impl TriageStage for SolutionSpecialist {
  fn stage(&self) -> Stage {
    Stage::ProvideSolution
  }

  #[instrument(name = "SolutionSpecialist::execute", skip_all)]
  async fn execute(&self, state: SharedState) -> TriageResult<StageUpdate> {
    let investigation_results = state.read_owned(TriageState::investigation_results)?;
    let log_analysis = state.read_owned(TriageState::log_analysis)?;

    info!("Generating remediation plan with LLM");
    let plan = self
      .model
      .generate(
        SYSTEM_INSTRUCTION,
        &prompts::remediation_prompt(&investigation_results, &log_analysis),
      )
      .await?;

    info!("Remediation plan generated with LLM");
    Ok(StageUpdate::with_messages(
      StageOutput::RemediationPlan(plan),
      vec![
        "Generating remediation plan with LLM".to_string(),
        "Remediation plan generated with LLM".to_string(),
      ],
    ))
  }
}
