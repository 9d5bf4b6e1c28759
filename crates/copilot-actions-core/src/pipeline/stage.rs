//! Pipeline stage state machine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Progress of one session's detached pipeline
///
/// ```text
/// created -> chat-reset -> prompt-submitted -> completed
///    |           |                |
///    +-----------+----------------+-----------> failed
/// ```
///
/// `completed` and `failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    /// Spawned, waiting out the initial delay
    Created,
    /// The chat panel was reset
    ChatReset,
    /// The delegated prompt was handed to the chat panel
    PromptSubmitted,
    /// Pipeline recorded its success (terminal)
    Completed,
    /// Pipeline recorded a failure or was cancelled (terminal)
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Created => "created",
            PipelineStage::ChatReset => "chat-reset",
            PipelineStage::PromptSubmitted => "prompt-submitted",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Failed)
    }

    /// Whether moving to `next` is a legal step. Self transitions are not.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        if self == next {
            return false;
        }

        match self {
            PipelineStage::Created => {
                matches!(next, PipelineStage::ChatReset | PipelineStage::Failed)
            }
            PipelineStage::ChatReset => {
                matches!(next, PipelineStage::PromptSubmitted | PipelineStage::Failed)
            }
            PipelineStage::PromptSubmitted => {
                matches!(next, PipelineStage::Completed | PipelineStage::Failed)
            }
            PipelineStage::Completed | PipelineStage::Failed => false,
        }
    }

    /// Like `can_transition_to`, with an error naming the rejected step
    pub fn validate_transition(&self, next: &Self) -> SessionResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(SessionError::Pipeline(format!(
                "invalid stage transition {} -> {}",
                self, next
            )))
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
