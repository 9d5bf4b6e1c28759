//! Tool registry: definitions, enable/disable state and dispatch

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chat_agent::StartChatAgentTool;
use super::handler::ToolHandler;
use super::sessions::{CompleteSessionTool, SessionStatusTool, StartSessionTool};
use crate::error::{ToolError, ToolOutcome};
use crate::logging::Logger;
use crate::pipeline::Delegator;
use crate::types::{Tool, ToolCall, ToolResult};

/// A tool as listed to the extension shim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    /// JSON Schema for tool parameters
    pub input_schema: Value,
    pub enabled: bool,
}

impl From<&ToolInfo> for Tool {
    fn from(info: &ToolInfo) -> Self {
        Tool {
            name: info.name.clone(),
            description: info.description.clone(),
            input_schema: Some(info.input_schema.clone()),
        }
    }
}

/// Registry of the tools this extension exposes
pub struct ToolRegistry {
    /// Registration order is listing order
    handlers: RwLock<Vec<Arc<dyn ToolHandler>>>,
    disabled: RwLock<HashSet<String>>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            disabled: RwLock::new(HashSet::new()),
            logger,
        }
    }

    /// Registry with all four tools wired to `delegator`, honoring its
    /// `tools.disabled` setting
    pub fn with_delegator(delegator: Arc<Delegator>, logger: Arc<dyn Logger>) -> Self {
        let registry = Self::new(logger.clone());
        let settings = delegator.settings();

        registry.register(Arc::new(
            StartChatAgentTool::new(delegator.host().clone(), logger)
                .with_command(settings.delegation.open_chat_command.clone()),
        ));
        registry.register(Arc::new(StartSessionTool::new(delegator.clone())));
        registry.register(Arc::new(CompleteSessionTool::new(delegator.clone())));
        registry.register(Arc::new(SessionStatusTool::new(delegator.clone())));

        for name in &settings.tools.disabled {
            registry.set_tool_enabled(name, false);
        }
        registry
    }

    /// Add a tool, replacing any tool with the same name
    pub fn register(&self, handler: Arc<dyn ToolHandler>) {
        let name = handler.definition().name;
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|h| h.definition().name == name) {
            Some(pos) => handlers[pos] = handler,
            None => handlers.push(handler),
        }
    }

    /// Enable or disable a tool by name
    pub fn set_tool_enabled(&self, name: &str, enabled: bool) {
        let mut disabled = self.disabled.write();
        if enabled {
            disabled.remove(name);
        } else {
            disabled.insert(name.to_string());
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.read().contains(name)
    }

    /// Every registered tool, enabled or not
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let disabled = self.disabled.read();
        self.handlers
            .read()
            .iter()
            .map(|h| {
                let tool = h.definition();
                ToolInfo {
                    enabled: !disabled.contains(&tool.name),
                    input_schema: tool.input_schema.unwrap_or(Value::Null),
                    name: tool.name,
                    description: tool.description,
                }
            })
            .collect()
    }

    /// Definitions of the enabled tools
    pub fn get_tools(&self) -> Vec<Tool> {
        self.list_tools()
            .iter()
            .filter(|t| t.enabled)
            .map(Tool::from)
            .collect()
    }

    fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers
            .read()
            .iter()
            .find(|h| h.definition().name == name)
            .cloned()
    }

    /// Run a tool by name
    pub async fn invoke(&self, name: &str, input: Value) -> ToolOutcome<String> {
        let handler = self
            .handler(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        if !self.is_enabled(name) {
            return Err(ToolError::Disabled(name.to_string()));
        }

        self.logger.debug(&format!("[ToolRegistry] Calling tool: {}", name));
        let outcome = handler.invoke(input).await;
        if let Err(e) = &outcome {
            self.logger.warn(&format!("[ToolRegistry] {} failed: {}", name, e));
        }
        outcome
    }

    /// Execute a tool call; failures come back as error results
    pub async fn execute_tool_call(&self, tool_call: &ToolCall) -> ToolResult {
        match self.invoke(&tool_call.name, tool_call.input.clone()).await {
            Ok(content) => ToolResult::success(&tool_call.id, content),
            Err(e) => ToolResult::error(&tool_call.id, e.to_string()),
        }
    }

    /// Execute several tool calls in order
    pub async fn execute_tool_calls(&self, tool_calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            results.push(self.execute_tool_call(call).await);
        }
        results
    }

    pub fn tool_count(&self) -> usize {
        self.handlers.read().len()
    }
}
