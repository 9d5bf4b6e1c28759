//! `copilot-actions_start-chat-agent`: open the chat panel with a prompt

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::handler::ToolHandler;
use super::START_CHAT_AGENT_TOOL;
use crate::error::{HostError, ToolError, ToolOutcome};
use crate::host::{HostActions, OPEN_CHAT_COMMAND};
use crate::logging::SharedLogger;
use crate::types::{ChatMode, ChatOpenArgs, Tool};

const INVALID_PARAMETERS: &str = "Invalid parameters for start-chat-agent tool.";
const STARTED: &str = "Started Copilot chat session.";

#[derive(Debug, Deserialize)]
struct StartChatAgentParams {
    prompt: String,
    mode: ChatMode,
}

/// Opens the chat panel with the given prompt and mode
pub struct StartChatAgentTool {
    host: Arc<dyn HostActions>,
    command: String,
    logger: SharedLogger,
}

impl StartChatAgentTool {
    pub fn new(host: Arc<dyn HostActions>, logger: SharedLogger) -> Self {
        Self {
            host,
            command: OPEN_CHAT_COMMAND.to_string(),
            logger,
        }
    }

    /// Use another command to open the chat
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

#[async_trait]
impl ToolHandler for StartChatAgentTool {
    fn definition(&self) -> Tool {
        Tool::new(
            START_CHAT_AGENT_TOOL,
            "Open the Copilot chat panel with a prompt in the given mode.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Prompt to submit to the chat"
                },
                "mode": {
                    "type": "string",
                    "enum": ["ask", "edit", "agent"],
                    "description": "Chat mode to open"
                }
            },
            "required": ["prompt", "mode"]
        }))
    }

    async fn invoke(&self, input: Value) -> ToolOutcome<String> {
        let params: StartChatAgentParams = serde_json::from_value(input).map_err(|e| {
            crate::log_warn!(self.logger, "{} {}", INVALID_PARAMETERS, e);
            ToolError::InvalidParameters(INVALID_PARAMETERS.to_string())
        })?;

        let args = ChatOpenArgs::new(params.prompt, params.mode);
        let args = serde_json::to_value(&args)
            .map_err(|e| ToolError::Execution(format!("Failed to start chat session: {}", e)))?;

        match self.host.execute_command(&self.command, Some(args)).await {
            Ok(_) => {
                crate::log_info!(self.logger, "Opened chat in {} mode", params.mode);
                Ok(STARTED.to_string())
            }
            Err(e) => {
                let message = match e {
                    HostError::CommandFailed { message, .. } => message,
                    other => other.to_string(),
                };
                crate::log_error!(self.logger, "Failed to start chat: {}", message);
                Err(ToolError::Execution(format!(
                    "Failed to start chat session: {}",
                    message
                )))
            }
        }
    }
}
