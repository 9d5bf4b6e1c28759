//! Settings and settings providers
//!
//! Supports multiple configuration sources:
//! - `MemorySettingsProvider`: In-memory for testing
//! - `FileSettingsProvider`: YAML file-based (user/workspace level)
//!
//! `resolve_settings` layers defaults, then the user file, then the
//! workspace file.

mod traits;
mod memory;
mod file;
mod settings;

use std::path::Path;

pub use traits::{SettingsProvider, ConfigError, ConfigResult};
pub use memory::MemorySettingsProvider;
pub use file::{FileSettingsProvider, ConfigLevel};
pub use settings::{
    Settings, DelegationSettings, ShutdownSettings, ShutdownMode, ToolSettings,
};

/// Settings from the user file overlaid with the workspace file
pub fn resolve_settings(workspace_root: Option<&Path>) -> ConfigResult<Settings> {
    let mut layers = vec![FileSettingsProvider::user()];
    if let Some(root) = workspace_root {
        layers.push(FileSettingsProvider::workspace(root));
    }
    resolve_layers(&layers)
}

/// Overlay each provider's file onto the defaults, later layers winning
pub fn resolve_layers(layers: &[FileSettingsProvider]) -> ConfigResult<Settings> {
    let mut merged = serde_yaml::to_value(Settings::default())?;
    for layer in layers {
        if let Some(raw) = layer.load_raw()? {
            settings::merge_yaml(&mut merged, raw);
        }
    }
    Ok(serde_yaml::from_value(merged)?)
}
