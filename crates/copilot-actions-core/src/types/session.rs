//! Session record types
//!
//! A session is one delegated unit of work. Its record is written by the
//! detached pipeline that started the work and by whoever reports the
//! delegated task's real outcome, and read by status checks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SessionError, SessionResult};

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created, no completion recorded yet
    Pending,
    /// Completed with a result payload
    Completed,
    /// Completed with an error message
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Completed => "completed",
            SessionStatus::Error => "error",
        }
    }

    /// Whether a completion has been recorded
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Pending)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completion event: exactly one of a result payload or an error message
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Result(Value),
    Error(String),
}

impl Completion {
    /// Build a completion from the optional fields callers send.
    ///
    /// A JSON `null` result counts as absent. Supplying neither or both
    /// fields is rejected.
    pub fn from_parts(result: Option<Value>, error: Option<String>) -> SessionResult<Self> {
        let result = result.filter(|v| !v.is_null());
        match (result, error) {
            (Some(result), None) => Ok(Completion::Result(result)),
            (None, Some(error)) => Ok(Completion::Error(error)),
            (None, None) => Err(SessionError::InvalidArgument(
                "either result or error must be provided".to_string(),
            )),
            (Some(_), Some(_)) => Err(SessionError::InvalidArgument(
                "result and error are mutually exclusive".to_string(),
            )),
        }
    }

    /// Status a record takes once this completion is applied
    pub fn status(&self) -> SessionStatus {
        match self {
            Completion::Result(_) => SessionStatus::Completed,
            Completion::Error(_) => SessionStatus::Error,
        }
    }
}

/// Snapshot of one session's lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Generated identifier, never reused
    pub id: String,
    pub status: SessionStatus,
    /// Payload of a successful completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure detail of an error completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Creation time, kept across completions
    pub start_time: DateTime<Utc>,
    /// Time of the latest completion write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of completion writes applied so far
    #[serde(default)]
    pub revision: u64,
}

impl SessionRecord {
    /// Create a pending record with a fresh id
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create a pending record with a given id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: SessionStatus::Pending,
            result: None,
            error: None,
            start_time: Utc::now(),
            updated_at: None,
            revision: 0,
        }
    }

    /// Overwrite the outcome with a completion. `start_time` is untouched.
    pub fn apply(&mut self, completion: Completion) {
        self.status = completion.status();
        match completion {
            Completion::Result(value) => {
                self.result = Some(value);
                self.error = None;
            }
            Completion::Error(message) => {
                self.result = None;
                self.error = Some(message);
            }
        }
        self.revision += 1;
        self.updated_at = Some(Utc::now());
    }

    pub fn is_pending(&self) -> bool {
        self.status == SessionStatus::Pending
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}
