//! Session tools: start a delegated session, report its completion, query it

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::handler::ToolHandler;
use super::{COMPLETE_SESSION_TOOL, SESSION_STATUS_TOOL, START_SESSION_TOOL};
use crate::error::{ToolError, ToolOutcome};
use crate::pipeline::{caller_instructions, Delegator};
use crate::types::Tool;

fn invalid(tool: &str, detail: impl std::fmt::Display) -> ToolError {
    ToolError::InvalidParameters(format!("Invalid parameters for {} tool: {}", tool, detail))
}

fn parse<T: serde::de::DeserializeOwned>(tool: &str, input: Value) -> ToolOutcome<T> {
    serde_json::from_value(input).map_err(|e| invalid(tool, e))
}

#[derive(Debug, Deserialize)]
struct StartSessionParams {
    prompt: String,
}

/// `copilot-actions_start-session`
pub struct StartSessionTool {
    delegator: Arc<Delegator>,
}

impl StartSessionTool {
    pub fn new(delegator: Arc<Delegator>) -> Self {
        Self { delegator }
    }
}

#[async_trait]
impl ToolHandler for StartSessionTool {
    fn definition(&self) -> Tool {
        Tool::new(
            START_SESSION_TOOL,
            "Delegate a task to a new Copilot agent chat session. Returns a session id \
             to check progress with and report completion under.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Task for the delegated agent"
                }
            },
            "required": ["prompt"]
        }))
    }

    async fn invoke(&self, input: Value) -> ToolOutcome<String> {
        let params: StartSessionParams = parse("start-session", input)?;
        if params.prompt.trim().is_empty() {
            return Err(invalid("start-session", "prompt must not be empty"));
        }

        let session_id = self.delegator.start_session(&params.prompt)?;
        Ok(json!({
            "sessionId": session_id,
            "instructions": caller_instructions(&session_id),
        })
        .to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompleteSessionParams {
    session_id: String,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// `copilot-actions_complete-session`
pub struct CompleteSessionTool {
    delegator: Arc<Delegator>,
}

impl CompleteSessionTool {
    pub fn new(delegator: Arc<Delegator>) -> Self {
        Self { delegator }
    }
}

#[async_trait]
impl ToolHandler for CompleteSessionTool {
    fn definition(&self) -> Tool {
        Tool::new(
            COMPLETE_SESSION_TOOL,
            "Mark a delegated session as finished. Pass either a result or an error.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "sessionId": {
                    "type": "string",
                    "description": "Id returned by start-session"
                },
                "result": {
                    "description": "Outcome of the delegated task"
                },
                "error": {
                    "type": "string",
                    "description": "Why the delegated task failed"
                }
            },
            "required": ["sessionId"]
        }))
    }

    async fn invoke(&self, input: Value) -> ToolOutcome<String> {
        let params: CompleteSessionParams = parse("complete-session", input)?;
        let as_error = params.error.is_some();
        let id = params.session_id;

        if self.delegator.complete(&id, params.result, params.error)? {
            let outcome = if as_error { "error" } else { "completed" };
            Ok(format!("Session {} marked as {}.", id, outcome))
        } else {
            Ok(format!("Session {} already finished; completion ignored.", id))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatusParams {
    session_id: String,
}

/// `copilot-actions_session-status`
pub struct SessionStatusTool {
    delegator: Arc<Delegator>,
}

impl SessionStatusTool {
    pub fn new(delegator: Arc<Delegator>) -> Self {
        Self { delegator }
    }
}

#[async_trait]
impl ToolHandler for SessionStatusTool {
    fn definition(&self) -> Tool {
        Tool::new(
            SESSION_STATUS_TOOL,
            "Get the status of a delegated session: pending, completed or error.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "sessionId": {
                    "type": "string",
                    "description": "Id returned by start-session"
                }
            },
            "required": ["sessionId"]
        }))
    }

    async fn invoke(&self, input: Value) -> ToolOutcome<String> {
        let params: SessionStatusParams = parse("session-status", input)?;
        let view = self.delegator.status(&params.session_id)?;
        serde_json::to_string(&view).map_err(|e| ToolError::Execution(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::host::MockHostActions;
    use crate::logging::{NoOpLogger, SharedLogger};
    use crate::session::MemorySessionStore;

    fn delegator() -> Arc<Delegator> {
        let logger: SharedLogger = Arc::new(NoOpLogger::new());
        Arc::new(Delegator::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(MockHostActions::new(logger.clone())),
            Settings::default(),
            logger,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_complete_then_status() {
        let d = delegator();
        let started = StartSessionTool::new(d.clone())
            .invoke(json!({"prompt": "Update the README"}))
            .await
            .unwrap();
        let started: Value = serde_json::from_str(&started).unwrap();
        let id = started["sessionId"].as_str().unwrap().to_string();
        assert!(started["instructions"].as_str().unwrap().contains(&id));

        let status = SessionStatusTool::new(d.clone())
            .invoke(json!({"sessionId": id}))
            .await
            .unwrap();
        let status: Value = serde_json::from_str(&status).unwrap();
        assert_eq!(status["status"], "pending");
        assert_eq!(status["stage"], "created");
        assert!(status.get("result").is_none());

        let ack = CompleteSessionTool::new(d.clone())
            .invoke(json!({"sessionId": id, "result": {"summary": "done"}}))
            .await
            .unwrap();
        assert_eq!(ack, format!("Session {} marked as completed.", id));

        let ack = CompleteSessionTool::new(d.clone())
            .invoke(json!({"sessionId": id, "error": "boom"}))
            .await
            .unwrap();
        assert_eq!(ack, format!("Session {} marked as error.", id));

        let status = SessionStatusTool::new(d)
            .invoke(json!({"sessionId": id}))
            .await
            .unwrap();
        let status: Value = serde_json::from_str(&status).unwrap();
        assert_eq!(status["status"], "error");
        assert_eq!(status["error"], "boom");
        assert_eq!(status["revision"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_inputs() {
        let d = delegator();

        let err = StartSessionTool::new(d.clone())
            .invoke(json!({"prompt": "  "}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert!(d.store().is_empty());

        let err = CompleteSessionTool::new(d.clone())
            .invoke(json!({"result": 1}))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid parameters for complete-session tool"));

        let id = d.start_session("task").unwrap();
        let err = CompleteSessionTool::new(d.clone())
            .invoke(json!({"sessionId": id}))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid argument"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_session() {
        let d = delegator();

        let err = SessionStatusTool::new(d.clone())
            .invoke(json!({"sessionId": "nope"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Session not found: nope");

        let err = CompleteSessionTool::new(d)
            .invoke(json!({"sessionId": "nope", "result": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Session not found: nope");
    }
}
