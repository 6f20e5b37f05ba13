// logtriage/src/state.rs

//! The typed record threaded through every stage of a triage run.
//!
//! `TriageState` is populated strictly in order (`log_file_path`, `log_analysis`,
//! `investigation_results`, `remediation_plan`) and every output field is
//! assigned at most once. Stages never mutate it directly: they return a
//! [`StageUpdate`] and the pipeline merges it through [`TriageState::merge`],
//! which rejects out-of-order or repeated assignments.

use crate::core::phase::Phase;
use crate::error::{TriageError, TriageResult};
use std::fmt;

/// Names the fields of [`TriageState`], mostly for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
  LogFilePath,
  LogAnalysis,
  InvestigationResults,
  RemediationPlan,
}

impl StateField {
  pub fn name(&self) -> &'static str {
    match self {
      StateField::LogFilePath => "log_file_path",
      StateField::LogAnalysis => "log_analysis",
      StateField::InvestigationResults => "investigation_results",
      StateField::RemediationPlan => "remediation_plan",
    }
  }

  /// The field that must already be populated before this one may be set.
  pub fn predecessor(&self) -> Option<StateField> {
    match self {
      StateField::LogFilePath => None,
      StateField::LogAnalysis => Some(StateField::LogFilePath),
      StateField::InvestigationResults => Some(StateField::LogAnalysis),
      StateField::RemediationPlan => Some(StateField::InvestigationResults),
    }
  }
}

impl fmt::Display for StateField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Append-only trace of a run.
///
/// Combining two traces concatenates them; the empty trace is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(Vec<String>);

impl Messages {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn push(&mut self, message: impl Into<String>) {
    self.0.push(message.into());
  }

  /// Appends every entry of `other` after the existing entries, preserving order.
  pub fn combine(&mut self, other: impl IntoIterator<Item = String>) {
    self.0.extend(other);
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, String> {
    self.0.iter()
  }

  pub fn as_slice(&self) -> &[String] {
    &self.0
  }
}

impl<'a> IntoIterator for &'a Messages {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// The single field a stage produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
  LogAnalysis(String),
  InvestigationResults(String),
  RemediationPlan(String),
}

impl StageOutput {
  pub fn field(&self) -> StateField {
    match self {
      StageOutput::LogAnalysis(_) => StateField::LogAnalysis,
      StageOutput::InvestigationResults(_) => StateField::InvestigationResults,
      StageOutput::RemediationPlan(_) => StateField::RemediationPlan,
    }
  }

  pub fn text(&self) -> &str {
    match self {
      StageOutput::LogAnalysis(text) | StageOutput::InvestigationResults(text) | StageOutput::RemediationPlan(text) => {
        text
      }
    }
  }
}

/// What a stage hands back to the pipeline: its output plus any trace entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageUpdate {
  pub output: StageOutput,
  pub messages: Vec<String>,
}

impl StageUpdate {
  pub fn new(output: StageOutput) -> Self {
    Self {
      output,
      messages: Vec::new(),
    }
  }

  pub fn with_messages(output: StageOutput, messages: Vec<String>) -> Self {
    Self { output, messages }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageState {
  log_file_path: String,
  log_analysis: Option<String>,
  investigation_results: Option<String>,
  remediation_plan: Option<String>,
  messages: Messages,
}

impl TriageState {
  /// Fresh state for one run: only the path is set, the trace is empty.
  pub fn new(log_file_path: impl Into<String>) -> Self {
    Self {
      log_file_path: log_file_path.into(),
      log_analysis: None,
      investigation_results: None,
      remediation_plan: None,
      messages: Messages::new(),
    }
  }

  pub fn log_file_path(&self) -> &str {
    &self.log_file_path
  }

  pub fn log_analysis(&self) -> TriageResult<&str> {
    Self::require(&self.log_analysis, StateField::LogAnalysis)
  }

  pub fn investigation_results(&self) -> TriageResult<&str> {
    Self::require(&self.investigation_results, StateField::InvestigationResults)
  }

  pub fn remediation_plan(&self) -> TriageResult<&str> {
    Self::require(&self.remediation_plan, StateField::RemediationPlan)
  }

  pub fn messages(&self) -> &Messages {
    &self.messages
  }

  pub fn is_set(&self, field: StateField) -> bool {
    match field {
      StateField::LogFilePath => true,
      StateField::LogAnalysis => self.log_analysis.is_some(),
      StateField::InvestigationResults => self.investigation_results.is_some(),
      StateField::RemediationPlan => self.remediation_plan.is_some(),
    }
  }

  /// Derives the orchestrator phase from which fields are populated.
  /// A populated state reports `Solved`; only the pipeline moves a run to `Done`.
  pub fn phase(&self) -> Phase {
    if self.remediation_plan.is_some() {
      Phase::Solved
    } else if self.investigation_results.is_some() {
      Phase::Investigated
    } else if self.log_analysis.is_some() {
      Phase::LogAnalyzed
    } else {
      Phase::Start
    }
  }

  pub fn is_complete(&self) -> bool {
    self.remediation_plan.is_some()
  }

  /// Merges a stage's update into the state.
  ///
  /// The produced field must be unset and its predecessor must be set.
  /// On rejection the state, including `messages`, is left untouched.
  pub fn merge(&mut self, update: StageUpdate) -> TriageResult<()> {
    let field = update.output.field();

    if self.is_set(field) {
      return Err(TriageError::StateConsistency {
        field,
        reason: "field is already set and cannot be overwritten".to_string(),
      });
    }
    if let Some(predecessor) = field.predecessor() {
      if !self.is_set(predecessor) {
        return Err(TriageError::StateConsistency {
          field,
          reason: format!("'{}' must be set first", predecessor),
        });
      }
    }

    match update.output {
      StageOutput::LogAnalysis(text) => self.log_analysis = Some(text),
      StageOutput::InvestigationResults(text) => self.investigation_results = Some(text),
      StageOutput::RemediationPlan(text) => self.remediation_plan = Some(text),
    }
    self.messages.combine(update.messages);
    Ok(())
  }

  /// Consumes the state and returns the final plan.
  pub fn into_remediation_plan(self) -> TriageResult<String> {
    self.remediation_plan.ok_or(TriageError::StateNotReady {
      field: StateField::RemediationPlan,
    })
  }

  fn require(value: &Option<String>, field: StateField) -> TriageResult<&str> {
    value.as_deref().ok_or(TriageError::StateNotReady { field })
  }
}
