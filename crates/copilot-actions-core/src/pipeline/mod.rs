//! Detached delegation pipelines
//!
//! Starting a session spawns a pipeline that resets the chat panel, waits,
//! submits the delegated prompt and then records its own outcome on the
//! session. The `Delegator` owns the store and every running pipeline.

mod stage;
mod prompt;
mod runner;
mod delegator;

pub use stage::PipelineStage;
pub use prompt::{delegated_query, caller_instructions};
pub use runner::{CANCELLED_MESSAGE, STARTED_MESSAGE};
pub use delegator::{Delegator, SessionView};
