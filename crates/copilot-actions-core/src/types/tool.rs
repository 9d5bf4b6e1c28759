//! Tool wire types shared with the extension host

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition as advertised to the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (as registered with the editor)
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A tool invocation coming from the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier of this invocation, echoed back in the result
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Get an input argument by key
    pub fn get_arg(&self, key: &str) -> Option<&Value> {
        self.input.get(key)
    }

    /// Get an input argument as a string
    pub fn get_arg_str(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(|v| v.as_str())
    }
}

/// Tool result handed back to the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    #[serde(rename = "callId")]
    pub call_id: String,
    /// The result content
    pub content: String,
    /// Whether this result represents an error
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: error.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("copilot-actions_session-status", "Check a delegated session")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "sessionId": { "type": "string" }
                },
                "required": ["sessionId"]
            }));

        assert_eq!(tool.name, "copilot-actions_session-status");
        assert!(tool.input_schema.is_some());
    }

    #[test]
    fn test_tool_call_args() {
        let call = ToolCall::new(
            "call_1",
            "copilot-actions_start-chat-agent",
            json!({ "prompt": "explain this file", "mode": "ask" }),
        );

        assert_eq!(call.get_arg_str("prompt"), Some("explain this file"));
        assert_eq!(call.get_arg_str("mode"), Some("ask"));
        assert_eq!(call.get_arg_str("missing"), None);
    }

    #[test]
    fn test_tool_result_wire_format() {
        let ok = serde_json::to_value(ToolResult::success("call_1", "done")).unwrap();
        assert_eq!(ok, json!({ "callId": "call_1", "content": "done" }));

        let err = ToolResult::error("call_2", "Session not found: x");
        assert!(err.is_error);
        let value = serde_json::to_value(err).unwrap();
        assert_eq!(value["isError"], true);
    }
}
