//! Host action trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HostResult;

/// Command that starts a fresh chat in the chat panel
pub const NEW_CHAT_COMMAND: &str = "workbench.action.chat.newChat";

/// Command that opens the chat panel with a query
pub const OPEN_CHAT_COMMAND: &str = "workbench.action.chat.open";

/// Editor operations the core can trigger
///
/// What a command does inside the editor is opaque here; implementations
/// only deliver it and report failure.
///
/// Implementations:
/// - `RpcHostActions`: JSON-RPC to the extension's command server
/// - `MockHostActions`: records calls, scripted failures, for testing
#[async_trait]
pub trait HostActions: Send + Sync {
    /// Name of this host (e.g., "rpc:vscode", "mock")
    fn name(&self) -> &str;

    /// Execute an editor command and return whatever it returned
    async fn execute_command(&self, command: &str, args: Option<Value>) -> HostResult<Value>;

    /// Check whether the host can currently be reached
    async fn is_available(&self) -> bool {
        true
    }
}
