//! In-memory settings provider

use async_trait::async_trait;
use parking_lot::RwLock;

use super::settings::Settings;
use super::traits::{ConfigResult, SettingsProvider};

/// In-memory settings provider for testing
#[derive(Debug, Default)]
pub struct MemorySettingsProvider {
    settings: RwLock<Settings>,
}

impl MemorySettingsProvider {
    /// Create a provider holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding the given settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsProvider for MemorySettingsProvider {
    async fn get_settings(&self) -> ConfigResult<Settings> {
        Ok(self.settings.read().clone())
    }

    async fn update_settings(&self, settings: Settings) -> ConfigResult<()> {
        *self.settings.write() = settings;
        Ok(())
    }
}
