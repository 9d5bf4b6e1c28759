//! RPC module for reaching the editor
//!
//! The VS Code extension runs a small JSON-RPC server and registers its
//! socket as an endpoint. The core talks to it to execute editor commands:
//!
//! - Unix sockets (or named pipes on Windows)
//! - JSON-RPC 2.0 with Content-Length headers (LSP-style)
//! - An authentication token on every request
//!
//! ```rust,ignore
//! let client = RpcClient::new(endpoint.socket_path.to_string_lossy(), endpoint.auth_token);
//! client.execute_command("workbench.action.chat.open", Some(json!({
//!     "query": "Summarize the open file",
//!     "mode": "agent",
//! }))).await?;
//! ```

mod client;
pub mod endpoint;

pub use client::{RpcClient, RpcError, RpcResult};
pub use endpoint::{
    RpcEndpoint, RpcEndpointRegistry, COMMANDS_CAPABILITY,
    register_rpc_endpoint, get_rpc_endpoint, find_command_endpoint,
};
