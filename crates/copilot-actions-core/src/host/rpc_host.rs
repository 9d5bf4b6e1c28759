//! RPC-backed host actions
//!
//! Executes editor commands by making JSON-RPC calls to the extension's
//! command server.

use async_trait::async_trait;
use serde_json::Value;

use super::traits::HostActions;
use crate::error::{HostError, HostResult};
use crate::logging;
use crate::rpc::{find_command_endpoint, RpcClient, RpcEndpoint, RpcError};

/// Host actions delivered over JSON-RPC
pub struct RpcHostActions {
    name: String,
    client: RpcClient,
}

impl RpcHostActions {
    /// Create host actions for a registered endpoint
    pub fn new(endpoint: &RpcEndpoint) -> Self {
        Self {
            name: format!("rpc:{}", endpoint.name),
            client: RpcClient::new(
                endpoint.socket_path.to_string_lossy().to_string(),
                endpoint.auth_token.clone(),
            ),
        }
    }

    /// Create from socket path and auth token directly
    pub fn from_parts(
        name: impl Into<String>,
        socket_path: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            name: format!("rpc:{}", name.into()),
            client: RpcClient::new(socket_path, auth_token),
        }
    }

    /// Use the first registered endpoint that can execute commands
    pub fn discover() -> HostResult<Self> {
        find_command_endpoint()
            .map(|endpoint| Self::new(&endpoint))
            .ok_or_else(|| {
                HostError::Unavailable("no RPC endpoint with the commands capability is registered".to_string())
            })
    }
}

#[async_trait]
impl HostActions for RpcHostActions {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute_command(&self, command: &str, args: Option<Value>) -> HostResult<Value> {
        logging::debug("host::rpc", &format!("{}: executing {}", self.name, command));

        self.client
            .execute_command(command, args)
            .await
            .map_err(|e| match e {
                // The editor ran the command and it threw
                RpcError::RpcError { message, .. } => HostError::command_failed(command, message),
                other => HostError::Rpc(other),
            })
    }

    async fn is_available(&self) -> bool {
        self.client.ping().await.unwrap_or(false)
    }
}
