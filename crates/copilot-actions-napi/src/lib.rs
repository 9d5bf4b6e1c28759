//! Node.js bindings for copilot-actions via napi-rs

#![deny(clippy::all)]

use std::path::Path;
use std::sync::Arc;

use napi::bindgen_prelude::*;
use napi_derive::napi;

use copilot_actions_core::config::resolve_settings;
use copilot_actions_core::host::{HostActions, MockHostActions, RpcHostActions};
use copilot_actions_core::logging::{self as core_logging, FileLogger, SharedLogger};
use copilot_actions_core::pipeline::Delegator;
use copilot_actions_core::rpc::{
    RpcEndpoint as CoreRpcEndpoint,
    register_rpc_endpoint as core_register_rpc_endpoint,
    get_rpc_endpoint as core_get_rpc_endpoint,
};
use copilot_actions_core::session::MemorySessionStore;
use copilot_actions_core::tools::ToolRegistry;
use copilot_actions_core::types::ToolCall;

fn to_napi_error(e: impl std::fmt::Display) -> Error {
    Error::from_reason(e.to_string())
}

// ============================================================================
// CopilotActions
// ============================================================================

/// Options for constructing `CopilotActions`
#[napi(object)]
pub struct CopilotActionsOptions {
    /// Registered RPC endpoint to run editor commands through. Defaults to
    /// the first endpoint with the "commands" capability.
    pub endpoint: Option<String>,
    /// Workspace root; its .config/copilot-actions/config.yaml overrides the user file
    pub workspace_root: Option<String>,
    /// Record editor commands instead of executing them
    pub dry_run: Option<bool>,
}

/// Tool definition as served to the extension shim
#[napi(object)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool input, serialized
    pub input_schema: String,
    pub enabled: bool,
}

/// Outcome of a tool invocation
#[napi(object)]
pub struct ToolInvocationResult {
    pub content: String,
    pub is_error: bool,
}

/// Tools and delegated sessions for one extension activation
#[napi]
pub struct CopilotActions {
    delegator: Arc<Delegator>,
    registry: Arc<ToolRegistry>,
    dry_run_host: Option<Arc<MockHostActions>>,
}

#[napi]
impl CopilotActions {
    #[napi(constructor)]
    pub fn new(options: Option<CopilotActionsOptions>) -> Result<Self> {
        let options = options.unwrap_or(CopilotActionsOptions {
            endpoint: None,
            workspace_root: None,
            dry_run: None,
        });
        let logger: SharedLogger = Arc::new(FileLogger::new("copilot-actions"));

        let settings = resolve_settings(options.workspace_root.as_deref().map(Path::new))
            .map_err(to_napi_error)?;

        let mut dry_run_host = None;
        let host: Arc<dyn HostActions> = if options.dry_run.unwrap_or(false) {
            let mock = Arc::new(MockHostActions::new(logger.clone()));
            dry_run_host = Some(mock.clone());
            mock
        } else if let Some(name) = options.endpoint.as_deref() {
            let endpoint = core_get_rpc_endpoint(name)
                .ok_or_else(|| Error::from_reason(format!("Endpoint '{}' not registered", name)))?;
            Arc::new(RpcHostActions::new(&endpoint))
        } else {
            Arc::new(RpcHostActions::discover().map_err(to_napi_error)?)
        };

        core_logging::info(
            "napi",
            &format!("CopilotActions: host {}, {:?}", host.name(), settings.delegation.completion_policy),
        );

        let delegator = Arc::new(Delegator::new(
            Arc::new(MemorySessionStore::new()),
            host,
            settings,
            logger.clone(),
        ));
        let registry = Arc::new(ToolRegistry::with_delegator(delegator.clone(), logger));

        Ok(Self {
            delegator,
            registry,
            dry_run_host,
        })
    }

    /// Name of the host editor commands go to
    #[napi(getter)]
    pub fn host_name(&self) -> String {
        self.delegator.host().name().to_string()
    }

    #[napi]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| ToolDefinition {
                name: t.name,
                description: t.description,
                input_schema: t.input_schema.to_string(),
                enabled: t.enabled,
            })
            .collect()
    }

    /// Run a tool; failures come back with `isError` set, never as a rejection
    #[napi]
    pub async fn invoke_tool(&self, name: String, input_json: String) -> ToolInvocationResult {
        let input = match serde_json::from_str(&input_json) {
            Ok(input) => input,
            Err(e) => {
                return ToolInvocationResult {
                    content: format!("Invalid tool input: {}", e),
                    is_error: true,
                }
            }
        };

        let result = self
            .registry
            .execute_tool_call(&ToolCall::new(name.clone(), name, input))
            .await;
        ToolInvocationResult {
            content: result.content,
            is_error: result.is_error,
        }
    }

    /// Start a delegated session; resolves with its id right away
    #[napi]
    pub async fn start_session(&self, prompt: String) -> Result<String> {
        self.delegator.start_session(&prompt).map_err(to_napi_error)
    }

    /// Report a session's outcome. Pass exactly one of `resultJson` and `error`.
    ///
    /// Resolves with whether the record changed.
    #[napi]
    pub fn complete_session(
        &self,
        session_id: String,
        result_json: Option<String>,
        error: Option<String>,
    ) -> Result<bool> {
        let result = result_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| Error::from_reason(format!("Invalid result JSON: {}", e)))?;
        self.delegator
            .complete(&session_id, result, error)
            .map_err(to_napi_error)
    }

    /// Session record (and pipeline stage while running) as JSON
    #[napi]
    pub fn session_status(&self, session_id: String) -> Result<String> {
        let view = self.delegator.status(&session_id).map_err(to_napi_error)?;
        serde_json::to_string(&view).map_err(to_napi_error)
    }

    /// Cancel a session's pipeline; resolves with whether one was running
    #[napi]
    pub fn cancel_session(&self, session_id: String) -> Result<bool> {
        self.delegator.cancel(&session_id).map_err(to_napi_error)
    }

    /// Commands recorded in dry-run mode
    #[napi]
    pub fn issued_commands(&self) -> Vec<String> {
        self.dry_run_host
            .as_ref()
            .map(|host| host.commands())
            .unwrap_or_default()
    }

    /// Stop accepting sessions, finish or cancel running pipelines and drop
    /// every record
    #[napi]
    pub async fn dispose(&self) {
        self.delegator.shutdown().await;
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Effective settings (defaults, user file, workspace file) as JSON
#[napi]
pub fn resolve_settings_json(workspace_root: Option<String>) -> Result<String> {
    let settings = resolve_settings(workspace_root.as_deref().map(Path::new))
        .map_err(to_napi_error)?;
    serde_json::to_string(&settings).map_err(to_napi_error)
}

// ============================================================================
// RPC Endpoint Registration
// ============================================================================

/// Configuration for registering an RPC endpoint
#[napi(object)]
pub struct RpcEndpointConfig {
    /// Name of the endpoint (e.g., "vscode")
    pub name: String,
    /// Path to the Unix socket or named pipe
    pub socket_path: String,
    /// Authentication token
    pub auth_token: String,
    /// Capabilities this endpoint supports (e.g., ["commands"])
    pub capabilities: Vec<String>,
}

/// Register the extension's JSON-RPC server so editor commands can reach it
#[napi]
pub fn register_rpc_endpoint(config: RpcEndpointConfig) -> Result<()> {
    let endpoint = CoreRpcEndpoint::new(
        config.name,
        config.socket_path,
        config.auth_token,
        config.capabilities,
    );
    core_register_rpc_endpoint(endpoint);
    Ok(())
}

/// Unregister an RPC endpoint by name
#[napi]
pub fn unregister_rpc_endpoint(name: String) -> Result<bool> {
    use copilot_actions_core::rpc::endpoint::unregister_rpc_endpoint;
    Ok(unregister_rpc_endpoint(&name).is_some())
}

/// List all registered RPC endpoints
#[napi]
pub fn list_rpc_endpoints() -> Vec<String> {
    use copilot_actions_core::rpc::endpoint::list_rpc_endpoints;
    list_rpc_endpoints()
}

/// Check if an RPC endpoint is registered and answers a ping
#[napi]
pub async fn is_rpc_endpoint_available(name: String) -> bool {
    match core_get_rpc_endpoint(&name) {
        Some(endpoint) => RpcHostActions::new(&endpoint).is_available().await,
        None => false,
    }
}

// ============================================================================
// Debug Logging
// ============================================================================

/// Get the path to the debug log file
#[napi]
pub fn get_debug_log_path() -> String {
    core_logging::log_file_path().to_string_lossy().to_string()
}

/// Clear the debug log file
#[napi]
pub fn clear_debug_log() {
    core_logging::clear_log();
}

/// Write a message to the debug log
#[napi]
pub fn debug_log(module: String, message: String) {
    core_logging::info(&module, &message);
}

/// Turn the debug log on or off, overriding COPILOT_ACTIONS_DEBUG
#[napi]
pub fn set_debug_logging(enabled: bool) {
    core_logging::file_logger::set_enabled(enabled);
}
