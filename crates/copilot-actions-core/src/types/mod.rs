//! Core types shared across the crate
//!
//! Session records, chat panel arguments and tool wire types.

mod session;
mod chat;
mod tool;

pub use session::{SessionRecord, SessionStatus, Completion};
pub use chat::{ChatMode, ChatOpenArgs};
pub use tool::{Tool, ToolCall, ToolResult};
