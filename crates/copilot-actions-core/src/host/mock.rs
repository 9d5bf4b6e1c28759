//! Mock host for testing
//!
//! Records every command it is asked to execute and can be scripted to fail
//! or hang on specific commands. Lets pipelines and tools run without an
//! editor on the other end.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::traits::HostActions;
use crate::error::{HostError, HostResult};
use crate::logging::Logger;

/// Scripted reaction to one command
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return the given value
    Succeed(Value),
    /// Fail with the given message
    Fail(String),
    /// Never return
    Hang,
}

impl Default for MockMode {
    fn default() -> Self {
        MockMode::Succeed(Value::Null)
    }
}

/// A command the mock was asked to execute
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedCommand {
    pub command: String,
    pub args: Option<Value>,
}

/// Mock editor host
pub struct MockHostActions {
    default_mode: MockMode,
    overrides: HashMap<String, MockMode>,
    /// Latency added to every command in milliseconds (0 = none)
    delay_ms: u64,
    issued: Mutex<Vec<IssuedCommand>>,
    logger: Arc<dyn Logger>,
}

impl MockHostActions {
    /// Create a mock where every command succeeds
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            default_mode: MockMode::default(),
            overrides: HashMap::new(),
            delay_ms: 0,
            issued: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Fail whenever `command` is executed
    pub fn failing_on(mut self, command: impl Into<String>, message: impl Into<String>) -> Self {
        self.overrides.insert(command.into(), MockMode::Fail(message.into()));
        self
    }

    /// Never return from `command`
    pub fn hanging_on(mut self, command: impl Into<String>) -> Self {
        self.overrides.insert(command.into(), MockMode::Hang);
        self
    }

    /// Script the reaction to `command`
    pub fn with_mode(mut self, command: impl Into<String>, mode: MockMode) -> Self {
        self.overrides.insert(command.into(), mode);
        self
    }

    /// Reaction to commands without an override
    pub fn with_default_mode(mut self, mode: MockMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Set per-command latency
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Every command issued so far, in order
    pub fn issued(&self) -> Vec<IssuedCommand> {
        self.issued.lock().clone()
    }

    /// Names of the commands issued so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.issued.lock().iter().map(|c| c.command.clone()).collect()
    }

    fn mode_for(&self, command: &str) -> MockMode {
        self.overrides
            .get(command)
            .cloned()
            .unwrap_or_else(|| self.default_mode.clone())
    }
}

#[async_trait]
impl HostActions for MockHostActions {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute_command(&self, command: &str, args: Option<Value>) -> HostResult<Value> {
        self.issued.lock().push(IssuedCommand {
            command: command.to_string(),
            args,
        });
        self.logger.debug(&format!("[MockHost] {}", command));

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match self.mode_for(command) {
            MockMode::Succeed(value) => Ok(value),
            MockMode::Fail(message) => Err(HostError::command_failed(command, message)),
            MockMode::Hang => {
                futures::future::pending::<()>().await;
                Err(HostError::Cancelled)
            }
        }
    }
}
