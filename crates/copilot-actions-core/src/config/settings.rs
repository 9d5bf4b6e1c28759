//! Settings model
//!
//! All fields have defaults, so a settings file only needs the keys it
//! changes:
//!
//! ```yaml
//! delegation:
//!   initialDelayMs: 500
//!   submitDelayMs: 1000
//!   chatMode: agent
//!   completionPolicy: last-write-wins
//! shutdown:
//!   mode: drain
//!   drainTimeoutMs: 5000
//! tools:
//!   disabled: []
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::host::{NEW_CHAT_COMMAND, OPEN_CHAT_COMMAND};
use crate::session::CompletionPolicy;
use crate::types::ChatMode;

/// Complete settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub delegation: DelegationSettings,
    pub shutdown: ShutdownSettings,
    pub tools: ToolSettings,
}

/// How delegated sessions are started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelegationSettings {
    /// Wait before the first host action
    pub initial_delay_ms: u64,
    /// Wait between the first and the second host action
    pub submit_delay_ms: u64,
    /// First host action: reset the chat panel
    pub new_chat_command: String,
    /// Second host action: open the chat with the delegated prompt
    pub open_chat_command: String,
    /// Mode the delegated chat opens in
    pub chat_mode: ChatMode,
    pub completion_policy: CompletionPolicy,
}

impl Default for DelegationSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            submit_delay_ms: 1000,
            new_chat_command: NEW_CHAT_COMMAND.to_string(),
            open_chat_command: OPEN_CHAT_COMMAND.to_string(),
            chat_mode: ChatMode::Agent,
            completion_policy: CompletionPolicy::LastWriteWins,
        }
    }
}

impl DelegationSettings {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// What happens to in-flight pipelines at teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownMode {
    /// Let in-flight pipelines finish, up to the drain timeout
    Drain,
    /// Cancel in-flight pipelines right away
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShutdownSettings {
    pub mode: ShutdownMode,
    pub drain_timeout_ms: u64,
}

impl Default for ShutdownSettings {
    fn default() -> Self {
        Self {
            mode: ShutdownMode::Drain,
            drain_timeout_ms: 5000,
        }
    }
}

impl ShutdownSettings {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    /// Tool names that reject every invocation
    pub disabled: Vec<String>,
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything
/// else in `overlay` replaces the value in `base`
pub(crate) fn merge_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, serde_yaml::Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}
