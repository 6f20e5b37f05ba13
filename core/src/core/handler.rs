// logtriage/src/core/handler.rs

//! Defines the `StageHandler` type the pipeline invokes for each stage.

use crate::core::shared_state::SharedState;
use crate::error::TriageResult;
use crate::state::StageUpdate;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a stage handler.
pub type StageFuture = Pin<Box<dyn Future<Output = TriageResult<StageUpdate>> + Send>>;

/// Type alias for a pipeline stage handler.
///
/// A handler is an asynchronous function that receives a clone of the run's
/// [`SharedState`] handle and resolves to the [`StageUpdate`] the pipeline
/// should merge. Handlers are responsible for:
/// 1. Copying the inputs they need out of the state (`read_owned`) so that
///    **no lock guard is held across an `.await`**.
/// 2. Calling their collaborators.
/// 3. Returning their output instead of writing it; the pipeline does the merge.
pub type StageHandler = Box<dyn Fn(SharedState) -> StageFuture + Send + Sync>;
