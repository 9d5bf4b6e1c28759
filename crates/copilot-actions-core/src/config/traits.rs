//! Settings provider trait

use async_trait::async_trait;

use super::settings::Settings;

/// Settings provider abstraction
///
/// Implementations:
/// - `MemorySettingsProvider`: In-memory for testing
/// - `FileSettingsProvider`: YAML file (~/.config/copilot-actions/config.yaml)
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings, with defaults filled in
    async fn get_settings(&self) -> ConfigResult<Settings>;

    /// Replace the stored settings
    async fn update_settings(&self, settings: Settings) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
