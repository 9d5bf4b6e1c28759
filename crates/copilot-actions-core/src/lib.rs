//! copilot-actions core
//!
//! Runtime-agnostic core of the copilot-actions extension: tools a Copilot
//! agent calls to drive the chat panel and to delegate a sub-task to a new
//! chat session, plus the tracker that follows each delegated session until
//! it reports back.
//!
//! ## Delegated sessions
//!
//! ```rust,ignore
//! use copilot_actions_core::{Delegator, MemorySessionStore, RpcHostActions, Settings};
//!
//! let delegator = Arc::new(Delegator::new(
//!     Arc::new(MemorySessionStore::new()),
//!     Arc::new(RpcHostActions::discover()?),
//!     Settings::default(),
//!     logger.clone(),
//! ));
//!
//! // Returns at once; the chat is opened by a detached pipeline
//! let id = delegator.start_session("Add tests for the parser")?;
//!
//! // Later, from the delegated agent
//! delegator.complete(&id, Some(json!({"summary": "done"})), None)?;
//! ```
//!
//! ## Tools
//!
//! ```rust,ignore
//! let registry = ToolRegistry::with_delegator(delegator, logger);
//! let result = registry.execute_tool_call(&tool_call).await;
//! ```

pub mod types;
pub mod error;
pub mod logging;
pub mod config;
pub mod rpc;
pub mod host;
pub mod session;
pub mod pipeline;
pub mod tools;

// Re-export commonly used types
pub use types::{
    SessionRecord, SessionStatus, Completion,
    ChatMode, ChatOpenArgs,
    Tool, ToolCall, ToolResult,
};

pub use error::{
    SessionError, SessionResult, HostError, HostResult, ToolError, ToolOutcome,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger, FileLogger};

pub use config::{
    Settings, SettingsProvider, MemorySettingsProvider, FileSettingsProvider,
    ConfigError, ConfigResult, resolve_settings,
};

pub use rpc::{
    RpcClient, RpcError, RpcResult, RpcEndpoint, RpcEndpointRegistry,
    register_rpc_endpoint, get_rpc_endpoint,
};

pub use host::{HostActions, RpcHostActions, MockHostActions};

pub use session::{SessionStore, MemorySessionStore, CompletionPolicy};

pub use pipeline::{Delegator, PipelineStage, SessionView};

pub use tools::{ToolRegistry, ToolHandler, ToolInfo};
