pub mod handler;
pub mod phase;
pub mod shared_state;
pub mod stage;

// Re-export key types for easier access from other modules (and lib.rs)
pub use handler::{StageFuture, StageHandler};
pub use phase::Phase;
pub use shared_state::SharedState;
pub use stage::Stage;
