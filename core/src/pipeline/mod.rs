// logtriage/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its handler registration, and execution logic.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
