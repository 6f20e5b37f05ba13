// logtriage/src/lib.rs

//! logtriage: a sequential, type-safe triage pipeline for production incident logs.
//!
//! A run goes through three fixed stages:
//!  - `analyze_logs`: read the log file and have a language model explain the failure.
//!  - `investigate_issue`: search for remediation knowledge and reconcile it with the analysis.
//!  - `provide_solution`: turn the investigation into a Markdown remediation plan.
//!
//! Each stage runs exactly once, in order, and the first failure ends the run.
//! Log access, search and text generation are injected through the traits in
//! [`collaborators`].

pub mod collaborators;
pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod stages;
pub mod state;

// --- Re-exports for the Public API ---

pub use crate::collaborators::{Collaborators, KnowledgeSearch, LanguageModel, LogSource, RootedLogSource};
pub use crate::config::{ModelSettings, TriageConfig};
pub use crate::core::handler::StageHandler;
pub use crate::core::phase::Phase;
pub use crate::core::shared_state::SharedState;
pub use crate::core::stage::Stage;
pub use crate::error::{TriageError, TriageResult};
pub use crate::orchestrator::Orchestrator;
pub use crate::pipeline::definition::Pipeline;
pub use crate::stages::TriageStage;
pub use crate::state::{Messages, StageOutput, StageUpdate, StateField, TriageState};

/*
    Typical use:
    1. Implement `KnowledgeSearch` and `LanguageModel` for your backends.
    2. Load a `TriageConfig` (`TriageConfig::from_env()` or `Default`).
    3. Build a `RootedLogSource::from_config(&config)?`.
    4. `Orchestrator::new(Collaborators::new(logs, search, model), config)`.
    5. `orchestrator.run("incident.log").await?.into_remediation_plan()`.
*/
