// logtriage/src/collaborators/mod.rs

//! The external collaborators the pipeline depends on.
//!
//! The core only talks to these traits. Concrete backends (a chat-completion
//! API, a web search API) are supplied by the integrator and injected through
//! [`Collaborators`]; nothing here is a process-wide singleton, so tests can
//! substitute mocks per run.

use crate::error::TriageResult;
use async_trait::async_trait;
use std::sync::Arc;

pub mod fs_log;

pub use fs_log::RootedLogSource;

/// Resolves a log file path to its text.
#[async_trait]
pub trait LogSource: Send + Sync {
  /// Fails with `TriageError::LogNotFound` when `path` does not resolve inside
  /// the permitted root and `TriageError::LogRead` on any other I/O failure.
  async fn read(&self, path: &str) -> TriageResult<String>;
}

/// Looks up externally sourced remediation knowledge.
#[async_trait]
pub trait KnowledgeSearch: Send + Sync {
  /// Returns at most `max_results` snippets, best match first.
  /// Fails with `TriageError::SearchUnavailable`.
  async fn search(&self, query: &str, max_results: usize) -> TriageResult<Vec<String>>;
}

/// Generates text from a role instruction and a task prompt.
///
/// Timeouts and retries are the implementation's business (see
/// [`crate::config::ModelSettings`]); the pipeline calls `generate` once per
/// stage and treats any error as final.
#[async_trait]
pub trait LanguageModel: Send + Sync {
  /// Fails with `TriageError::ModelInvocation`.
  async fn generate(&self, system_instruction: &str, task_prompt: &str) -> TriageResult<String>;
}

/// The collaborator instances one orchestrator runs against.
#[derive(Clone)]
pub struct Collaborators {
  pub log_source: Arc<dyn LogSource>,
  pub search: Arc<dyn KnowledgeSearch>,
  pub model: Arc<dyn LanguageModel>,
}

impl Collaborators {
  pub fn new(
    log_source: Arc<dyn LogSource>,
    search: Arc<dyn KnowledgeSearch>,
    model: Arc<dyn LanguageModel>,
  ) -> Self {
    Self {
      log_source,
      search,
      model,
    }
  }
}
