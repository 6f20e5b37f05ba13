// logtriage/src/core/phase.rs

//! The orchestrator's linear state machine.
//!
//! `Start --analyze_logs--> LogAnalyzed --investigate_issue--> Investigated
//! --provide_solution--> Solved --finalize--> Done`
//!
//! There are no other transitions: no cycles, no branches, no recovery edges.

use crate::core::stage::Stage;
use crate::error::{TriageError, TriageResult};
use std::fmt;

/// Where a single pipeline run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
  /// Only `log_file_path` is populated.
  Start,
  LogAnalyzed,
  Investigated,
  /// All outputs are populated but the run has not been finalized yet.
  Solved,
  /// Terminal. The run completed successfully.
  Done,
}

impl Phase {
  /// The single stage allowed to run from this phase, if any.
  pub fn next_stage(self) -> Option<Stage> {
    match self {
      Phase::Start => Some(Stage::AnalyzeLogs),
      Phase::LogAnalyzed => Some(Stage::InvestigateIssue),
      Phase::Investigated => Some(Stage::ProvideSolution),
      Phase::Solved | Phase::Done => None,
    }
  }

  /// Applies the transition for a completed `stage`.
  pub fn advance(self, stage: Stage) -> TriageResult<Phase> {
    if self.next_stage() == Some(stage) {
      Ok(stage.completes_to())
    } else {
      Err(TriageError::InvalidTransition {
        from: self,
        to: stage.completes_to(),
      })
    }
  }

  /// `Solved --finalize--> Done`.
  pub fn finalize(self) -> TriageResult<Phase> {
    match self {
      Phase::Solved => Ok(Phase::Done),
      other => Err(TriageError::InvalidTransition {
        from: other,
        to: Phase::Done,
      }),
    }
  }

  pub fn is_terminal(self) -> bool {
    self == Phase::Done
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Phase::Start => "start",
      Phase::LogAnalyzed => "log_analyzed",
      Phase::Investigated => "investigated",
      Phase::Solved => "solved",
      Phase::Done => "done",
    };
    f.write_str(name)
  }
}
