// tests/state_management_tests.rs
mod common;

use common::*;
use logtriage::{Messages, Phase, SharedState, Stage, StageOutput, StageUpdate, StateField, TriageError, TriageState};
use serial_test::serial;

fn update(output: StageOutput, messages: &[&str]) -> StageUpdate {
  StageUpdate::with_messages(output, messages.iter().map(|m| m.to_string()).collect())
}

fn populated_state() -> TriageState {
  let mut state = TriageState::new("app.log");
  state
    .merge(update(StageOutput::LogAnalysis("analysis".into()), &["m1"]))
    .unwrap();
  state
    .merge(update(StageOutput::InvestigationResults("investigation".into()), &["m2"]))
    .unwrap();
  state
    .merge(update(StageOutput::RemediationPlan("plan".into()), &["m3"]))
    .unwrap();
  state
}

#[test]
fn test_fresh_state_has_only_the_path() {
  let state = TriageState::new("app.log");
  assert_eq!(state.log_file_path(), "app.log");
  assert!(state.messages().is_empty());
  assert_eq!(state.phase(), Phase::Start);
  assert!(!state.is_complete());
  assert!(state.is_set(StateField::LogFilePath));
  assert!(!state.is_set(StateField::LogAnalysis));
}

#[test]
fn test_reading_unset_fields_is_not_ready() {
  let state = TriageState::new("app.log");
  for (result, expected) in [
    (state.log_analysis(), StateField::LogAnalysis),
    (state.investigation_results(), StateField::InvestigationResults),
    (state.remediation_plan(), StateField::RemediationPlan),
  ] {
    match result {
      Err(TriageError::StateNotReady { field }) => assert_eq!(field, expected),
      other => panic!("Expected StateNotReady for {}, got {:?}", expected, other),
    }
  }
  assert!(matches!(
    state.into_remediation_plan(),
    Err(TriageError::StateNotReady {
      field: StateField::RemediationPlan
    })
  ));
}

#[test]
fn test_merges_in_order_populate_every_field() {
  let state = populated_state();
  assert_eq!(state.log_analysis().unwrap(), "analysis");
  assert_eq!(state.investigation_results().unwrap(), "investigation");
  assert_eq!(state.remediation_plan().unwrap(), "plan");
  assert_eq!(state.messages().as_slice(), &["m1", "m2", "m3"]);
  assert_eq!(state.phase(), Phase::Solved);
  assert!(state.is_complete());
}

#[test]
fn test_merging_same_output_twice_is_inconsistent() {
  let mut state = TriageState::new("app.log");
  let first = update(StageOutput::LogAnalysis("analysis".into()), &["m1"]);
  state.merge(first.clone()).unwrap();

  match state.merge(first) {
    Err(TriageError::StateConsistency { field, .. }) => assert_eq!(field, StateField::LogAnalysis),
    other => panic!("Expected StateConsistency, got {:?}", other),
  }
  // Rejected merge leaves everything untouched, including the trace.
  assert_eq!(state.log_analysis().unwrap(), "analysis");
  assert_eq!(state.messages().len(), 1);
}

#[test]
fn test_out_of_order_merge_is_inconsistent() {
  let mut state = TriageState::new("app.log");
  let result = state.merge(update(StageOutput::InvestigationResults("early".into()), &["lost"]));

  match result {
    Err(TriageError::StateConsistency { field, reason }) => {
      assert_eq!(field, StateField::InvestigationResults);
      assert!(reason.contains("log_analysis"));
    }
    other => panic!("Expected StateConsistency, got {:?}", other),
  }
  assert!(state.investigation_results().is_err());
  assert!(state.messages().is_empty());

  let err = state
    .merge(update(StageOutput::RemediationPlan("early".into()), &[]))
    .unwrap_err();
  assert!(matches!(err, TriageError::StateConsistency { .. }));
}

#[test]
fn test_messages_concatenate_in_order() {
  let mut left = Messages::new();
  left.push("a");
  left.combine(vec!["b".to_string(), "c".to_string()]);
  left.combine(Vec::new());
  assert_eq!(left.as_slice(), &["a", "b", "c"]);

  // (x ++ y) ++ z == x ++ (y ++ z)
  let x = vec!["x".to_string()];
  let y = vec!["y1".to_string(), "y2".to_string()];
  let z = vec!["z".to_string()];

  let mut grouped_left = Messages::new();
  grouped_left.combine(x.clone());
  grouped_left.combine(y.clone());
  grouped_left.combine(z.clone());

  let mut yz = y;
  yz.extend(z);
  let mut grouped_right = Messages::new();
  grouped_right.combine(x);
  grouped_right.combine(yz);

  assert_eq!(grouped_left, grouped_right);
  assert_eq!((&grouped_left).into_iter().count(), 4);
}

#[test]
fn test_phase_machine_is_linear() {
  assert_eq!(Phase::Start.advance(Stage::AnalyzeLogs).unwrap(), Phase::LogAnalyzed);
  assert_eq!(Phase::LogAnalyzed.advance(Stage::InvestigateIssue).unwrap(), Phase::Investigated);
  assert_eq!(Phase::Investigated.advance(Stage::ProvideSolution).unwrap(), Phase::Solved);
  assert_eq!(Phase::Solved.finalize().unwrap(), Phase::Done);
  assert!(Phase::Done.is_terminal());

  assert!(Phase::Start.advance(Stage::InvestigateIssue).is_err());
  assert!(Phase::LogAnalyzed.advance(Stage::AnalyzeLogs).is_err());
  assert!(Phase::Solved.advance(Stage::ProvideSolution).is_err());
  assert!(Phase::Done.advance(Stage::AnalyzeLogs).is_err());
  assert!(matches!(
    Phase::Investigated.finalize(),
    Err(TriageError::InvalidTransition {
      from: Phase::Investigated,
      to: Phase::Done
    })
  ));
  assert_eq!(Phase::Solved.next_stage(), None);
  assert_eq!(Phase::Done.next_stage(), None);
}

#[test]
fn test_stage_metadata_lines_up() {
  for (idx, stage) in Stage::ALL.iter().enumerate() {
    assert_eq!(stage.index(), idx);
  }
  assert_eq!(Stage::AnalyzeLogs.produces(), StateField::LogAnalysis);
  assert_eq!(Stage::InvestigateIssue.produces(), StateField::InvestigationResults);
  assert_eq!(Stage::ProvideSolution.produces(), StateField::RemediationPlan);
  assert_eq!(Stage::InvestigateIssue.to_string(), "investigate_issue");
  assert_eq!(StateField::RemediationPlan.predecessor(), Some(StateField::InvestigationResults));
}

#[tokio::test]
#[serial]
async fn test_shared_state_clone_shares_data() {
  setup_tracing();
  let original = SharedState::for_log("app.log");
  let cloned = original.clone();

  original
    .merge(update(StageOutput::LogAnalysis("shared".into()), &["m1"]))
    .unwrap();
  assert_eq!(cloned.read().log_analysis().unwrap(), "shared"); // Clone sees modification
  assert_eq!(&*cloned.map_read(|s| s.log_file_path()), "app.log");

  let owned = cloned.read_owned(TriageState::log_analysis).unwrap();
  assert_eq!(owned, "shared");
  assert!(matches!(
    cloned.read_owned(TriageState::remediation_plan),
    Err(TriageError::StateNotReady { .. })
  ));

  // Another handle is alive, so into_inner falls back to a copy.
  let snapshot = original.snapshot();
  let inner = cloned.into_inner();
  assert_eq!(snapshot, inner);
  assert_eq!(original.into_inner(), inner);
}

// Hard to test directly; shows a handler pattern that copies inputs out and
// releases the lock before awaiting.
#[tokio::test]
#[serial]
async fn test_shared_state_locks_with_await() {
  setup_tracing();
  let state = SharedState::for_log("app.log");

  let handler_logic = async {
    let path = state.read().log_file_path().to_owned(); // Read lock dropped

    tokio::time::sleep(std::time::Duration::from_millis(1)).await; // .await here

    state
      .merge(update(StageOutput::LogAnalysis(format!("analysis of {}", path)), &[]))
      .unwrap();
    assert!(state.try_read().is_some());
  };

  handler_logic.await;
  assert_eq!(state.read().log_analysis().unwrap(), "analysis of app.log");
}
