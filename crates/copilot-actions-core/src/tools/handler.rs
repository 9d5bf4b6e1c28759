//! Tool handler trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolOutcome;
use crate::types::Tool;

/// One tool the agent can call
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, description and input schema
    fn definition(&self) -> Tool;

    /// Run the tool on the agent's input and return the text shown to it
    async fn invoke(&self, input: Value) -> ToolOutcome<String>;
}
