//! Tools exposed to the Copilot agent
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  VS Code extension shim (JavaScript)        │
//! │    registers the tools, forwards calls      │
//! └─────────────────────────────────────────────┘
//!           │ napi: invokeTool(name, input)
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  ToolRegistry                               │
//! │    start-chat-agent  ──► HostActions        │
//! │    start-session     ──► Delegator          │
//! │    complete-session  ──► Delegator          │
//! │    session-status    ──► Delegator          │
//! └─────────────────────────────────────────────┘
//! ```

mod handler;
mod chat_agent;
mod sessions;
mod registry;

pub use handler::ToolHandler;
pub use chat_agent::StartChatAgentTool;
pub use sessions::{StartSessionTool, CompleteSessionTool, SessionStatusTool};
pub use registry::{ToolRegistry, ToolInfo};

/// Prefix shared by every tool name
pub const TOOL_PREFIX: &str = "copilot-actions_";

pub const START_CHAT_AGENT_TOOL: &str = "copilot-actions_start-chat-agent";
pub const START_SESSION_TOOL: &str = "copilot-actions_start-session";
pub const COMPLETE_SESSION_TOOL: &str = "copilot-actions_complete-session";
pub const SESSION_STATUS_TOOL: &str = "copilot-actions_session-status";
