//! Error types for sessions, host actions and tools

use thiserror::Error;

use crate::rpc::RpcError;

/// Errors raised by the session tracker and the delegator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown session id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Malformed input, e.g. a completion with neither result nor error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure inside a detached pipeline. Only ever stored in the record.
    #[error("Pipeline failed: {0}")]
    Pipeline(String),

    /// The delegator no longer accepts new sessions
    #[error("Delegator is shutting down")]
    ShuttingDown,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from executing an editor command
#[derive(Error, Debug)]
pub enum HostError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Command {command} failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Host not available: {0}")]
    Unavailable(String),

    #[error("Host action cancelled")]
    Cancelled,
}

impl HostError {
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// Errors from dispatching a tool invocation
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool is disabled: {0}")]
    Disabled(String),

    #[error("{0}")]
    InvalidParameters(String),

    /// The tool ran and failed; the message is shown to the agent as-is
    #[error("{0}")]
    Execution(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ToolOutcome<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_messages() {
        assert_eq!(
            SessionError::NotFound("abc".to_string()).to_string(),
            "Session not found: abc"
        );
        assert!(SessionError::InvalidArgument("x".to_string())
            .to_string()
            .starts_with("Invalid argument"));
    }

    #[test]
    fn test_tool_error_is_transparent_over_session_error() {
        let err: ToolError = SessionError::NotFound("abc".to_string()).into();
        assert_eq!(err.to_string(), "Session not found: abc");
    }

    #[test]
    fn test_host_error_command_failed() {
        let err = HostError::command_failed("workbench.action.chat.open", "no chat view");
        assert_eq!(
            err.to_string(),
            "Command workbench.action.chat.open failed: no chat view"
        );
    }
}
