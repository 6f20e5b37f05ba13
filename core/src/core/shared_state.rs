// logtriage/src/core/shared_state.rs
use crate::error::TriageResult;
use crate::state::{StageUpdate, TriageState};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Shared handle to the state of one triage run, backed by parking_lot::RwLock.
///
/// Stages get read access only. All writes go through [`SharedState::merge`],
/// so the single-assignment and ordering checks of [`TriageState::merge`]
/// cannot be bypassed.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug)]
pub struct SharedState(Arc<RwLock<TriageState>>);

impl SharedState {
  pub fn new(state: TriageState) -> Self {
    SharedState(Arc::new(RwLock::new(state)))
  }

  /// Fresh state for a run over `log_file_path`.
  pub fn for_log(log_file_path: impl Into<String>) -> Self {
    Self::new(TriageState::new(log_file_path))
  }

  /// Acquires a read lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, TriageState> {
    self.0.read()
  }

  /// Attempts to acquire a read lock without blocking.
  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, TriageState>> {
    self.0.try_read()
  }

  // Example: state.map_read(|s| s.messages())
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&TriageState) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Reads a field through a fallible accessor and returns an owned copy,
  /// so the lock is released before the caller awaits anything.
  pub fn read_owned<F>(&self, f: F) -> TriageResult<String>
  where
    F: FnOnce(&TriageState) -> TriageResult<&str>,
  {
    f(&*self.read()).map(str::to_owned)
  }

  /// Merges a stage update under the write lock.
  pub fn merge(&self, update: StageUpdate) -> TriageResult<()> {
    self.0.write().merge(update)
  }

  /// Clones the current state.
  pub fn snapshot(&self) -> TriageState {
    self.read().clone()
  }

  /// Takes the state out of the handle, cloning only if other handles are still alive.
  pub fn into_inner(self) -> TriageState {
    match Arc::try_unwrap(self.0) {
      Ok(lock) => lock.into_inner(),
      Err(shared) => {
        let state = shared.read().clone();
        state
      }
    }
  }
}

impl Clone for SharedState {
  fn clone(&self) -> Self {
    SharedState(Arc::clone(&self.0))
  }
}
