//! Chat panel types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mode the chat panel opens in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Ask,
    Edit,
    Agent,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Ask => "ask",
            ChatMode::Edit => "edit",
            ChatMode::Agent => "agent",
        }
    }
}

impl Default for ChatMode {
    fn default() -> Self {
        ChatMode::Agent
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ask" => Ok(ChatMode::Ask),
            "edit" => Ok(ChatMode::Edit),
            "agent" => Ok(ChatMode::Agent),
            other => Err(format!("unknown chat mode: {}", other)),
        }
    }
}

/// Arguments of the editor's "open chat" command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOpenArgs {
    /// Text submitted to the chat
    pub query: String,
    pub mode: ChatMode,
}

impl ChatOpenArgs {
    pub fn new(query: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            query: query.into(),
            mode,
        }
    }
}
