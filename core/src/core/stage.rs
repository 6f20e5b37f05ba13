// logtriage/src/core/stage.rs

//! Identifies the three fixed stages of the triage pipeline.

use crate::core::phase::Phase;
use crate::state::StateField;
use std::fmt;

/// One step of the triage pipeline.
///
/// The declaration order is the execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
  /// Stage 1: reads the log file and asks the model for a failure analysis.
  AnalyzeLogs,
  /// Stage 2: searches for remediation knowledge and synthesizes an investigation report.
  InvestigateIssue,
  /// Stage 3: turns the investigation into a remediation plan.
  ProvideSolution,
}

impl Stage {
  /// All stages in execution order.
  pub const ALL: [Stage; 3] = [Stage::AnalyzeLogs, Stage::InvestigateIssue, Stage::ProvideSolution];

  pub fn name(&self) -> &'static str {
    match self {
      Stage::AnalyzeLogs => "analyze_logs",
      Stage::InvestigateIssue => "investigate_issue",
      Stage::ProvideSolution => "provide_solution",
    }
  }

  /// Position of the stage in the pipeline, starting at 0.
  pub fn index(&self) -> usize {
    match self {
      Stage::AnalyzeLogs => 0,
      Stage::InvestigateIssue => 1,
      Stage::ProvideSolution => 2,
    }
  }

  /// The state field this stage is responsible for populating.
  pub fn produces(&self) -> StateField {
    match self {
      Stage::AnalyzeLogs => StateField::LogAnalysis,
      Stage::InvestigateIssue => StateField::InvestigationResults,
      Stage::ProvideSolution => StateField::RemediationPlan,
    }
  }

  /// The phase the pipeline is in once this stage has completed.
  pub fn completes_to(&self) -> Phase {
    match self {
      Stage::AnalyzeLogs => Phase::LogAnalyzed,
      Stage::InvestigateIssue => Phase::Investigated,
      Stage::ProvideSolution => Phase::Solved,
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
