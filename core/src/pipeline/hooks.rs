// logtriage/src/pipeline/hooks.rs

//! Contains the methods for registering stage handlers on a `Pipeline`.

use crate::core::handler::StageHandler;
use crate::core::shared_state::SharedState;
use crate::core::stage::Stage;
use crate::error::TriageError;
use crate::pipeline::definition::Pipeline;
use crate::stages::TriageStage;
use std::future::Future;
use std::sync::Arc;
use tracing::{event, Level};

impl Pipeline {
  /// Registers the handler for `stage`.
  ///
  /// The `handler_fn` takes the run's `SharedState` and returns a `Future`
  /// resolving to `Result<StageUpdate, UserProvidedErr>`, where
  /// `UserProvidedErr` must be convertible into `TriageError`.
  pub fn on_stage<F, UserProvidedErr>(
    &mut self,
    stage: Stage,
    handler_fn: impl Fn(SharedState) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<crate::state::StageUpdate, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<TriageError> + Send + Sync + 'static,
  {
    self.ensure_no_handler(stage);
    let final_handler: StageHandler = Box::new(move |state| {
      let user_fut = handler_fn(state);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.handlers.insert(stage, final_handler);
    event!(Level::DEBUG, %stage, "Stage handler registered.");
  }

  /// Registers a stage implementation under the stage it reports.
  pub fn with_stage(&mut self, stage_impl: Arc<dyn TriageStage>) -> &mut Self {
    let stage = stage_impl.stage();
    self.on_stage(stage, move |state| {
      let stage_impl = stage_impl.clone();
      async move { stage_impl.execute(state).await }
    });
    self
  }
}
