//! RPC endpoint registration and discovery
//!
//! The extension registers the socket of its command server here when it
//! activates; host actions look it up by name.

use std::collections::HashMap;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Capability an endpoint advertises when it can execute editor commands
pub const COMMANDS_CAPABILITY: &str = "commands";

/// Information about an RPC endpoint
#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    /// Human-readable name (e.g., "vscode")
    pub name: String,
    /// Path to the Unix socket or named pipe
    pub socket_path: PathBuf,
    /// Authentication token required for requests
    pub auth_token: String,
    /// Capabilities this endpoint supports
    pub capabilities: Vec<String>,
}

impl RpcEndpoint {
    pub fn new(
        name: impl Into<String>,
        socket_path: impl Into<PathBuf>,
        auth_token: impl Into<String>,
        capabilities: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            socket_path: socket_path.into(),
            auth_token: auth_token.into(),
            capabilities,
        }
    }

    /// Check if this endpoint supports a specific capability
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Check if this endpoint can execute editor commands
    pub fn supports_commands(&self) -> bool {
        self.has_capability(COMMANDS_CAPABILITY)
    }
}

/// Registry for RPC endpoints
pub struct RpcEndpointRegistry {
    endpoints: RwLock<HashMap<String, RpcEndpoint>>,
}

impl RpcEndpointRegistry {
    pub fn new() -> Self {
        Self {
            endpoints: RwLock::new(HashMap::new()),
        }
    }

    /// Register an endpoint, replacing any previous one with the same name
    pub fn register(&self, endpoint: RpcEndpoint) {
        let name = endpoint.name.clone();
        self.endpoints.write().insert(name, endpoint);
    }

    /// Unregister an endpoint by name
    pub fn unregister(&self, name: &str) -> Option<RpcEndpoint> {
        self.endpoints.write().remove(name)
    }

    /// Get an endpoint by name
    pub fn get(&self, name: &str) -> Option<RpcEndpoint> {
        self.endpoints.read().get(name).cloned()
    }

    /// Get all endpoints that support a capability
    pub fn get_by_capability(&self, capability: &str) -> Vec<RpcEndpoint> {
        self.endpoints
            .read()
            .values()
            .filter(|e| e.has_capability(capability))
            .cloned()
            .collect()
    }

    /// List all registered endpoint names
    pub fn list(&self) -> Vec<String> {
        self.endpoints.read().keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }
}

impl Default for RpcEndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Endpoints are process-wide: the extension registers once on activation
static GLOBAL_REGISTRY: Lazy<RpcEndpointRegistry> = Lazy::new(RpcEndpointRegistry::new);

/// Register an RPC endpoint globally
pub fn register_rpc_endpoint(endpoint: RpcEndpoint) {
    GLOBAL_REGISTRY.register(endpoint);
}

/// Get an RPC endpoint by name from the global registry
pub fn get_rpc_endpoint(name: &str) -> Option<RpcEndpoint> {
    GLOBAL_REGISTRY.get(name)
}

/// First registered endpoint that can execute editor commands
pub fn find_command_endpoint() -> Option<RpcEndpoint> {
    GLOBAL_REGISTRY
        .get_by_capability(COMMANDS_CAPABILITY)
        .into_iter()
        .next()
}

/// Unregister an RPC endpoint by name
pub fn unregister_rpc_endpoint(name: &str) -> Option<RpcEndpoint> {
    GLOBAL_REGISTRY.unregister(name)
}

/// List all registered RPC endpoints
pub fn list_rpc_endpoints() -> Vec<String> {
    GLOBAL_REGISTRY.list()
}
