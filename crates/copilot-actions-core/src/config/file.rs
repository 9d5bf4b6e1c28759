//! File-based settings provider (YAML)
//!
//! Supports user-level (~/.config/copilot-actions/config.yaml) and workspace-level
//! (.config/copilot-actions/config.yaml) settings.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::settings::Settings;
use super::traits::{ConfigResult, SettingsProvider};

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/copilot-actions/config.yaml)
    User,
    /// Workspace-level config (.config/copilot-actions/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// File-based settings provider
///
/// # Example
///
/// ```no_run
/// use copilot_actions_core::config::FileSettingsProvider;
///
/// let user = FileSettingsProvider::user();
/// let workspace = FileSettingsProvider::workspace("/path/to/workspace");
/// ```
pub struct FileSettingsProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<serde_yaml::Value>>,
}

impl FileSettingsProvider {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// User-level provider (~/.config/copilot-actions/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        Self::new(
            config_dir.join("copilot-actions").join("config.yaml"),
            ConfigLevel::User,
        )
    }

    /// Workspace-level provider (.config/copilot-actions/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root
            .as_ref()
            .join(".config")
            .join("copilot-actions")
            .join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Raw YAML document, `None` when the file does not exist
    ///
    /// Layering works on the raw document so that keys a file leaves out do
    /// not override another layer with defaults.
    pub fn load_raw(&self) -> ConfigResult<Option<serde_yaml::Value>> {
        if let Some(value) = self.cache.read().as_ref() {
            return Ok(Some(value.clone()));
        }
        if !self.exists() {
            return Ok(None);
        }
        let value = self.read_file()?;
        *self.cache.write() = Some(value.clone());
        Ok(Some(value))
    }

    /// Re-read the file from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<Option<serde_yaml::Value>> {
        *self.cache.write() = None;
        self.load_raw()
    }

    fn read_file(&self) -> ConfigResult<serde_yaml::Value> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(serde_yaml::Value::Null);
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, settings: &Settings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let value = serde_yaml::to_value(settings)?;
        fs::write(&self.path, serde_yaml::to_string(&value)?)?;
        *self.cache.write() = Some(value);
        Ok(())
    }
}

impl std::fmt::Debug for FileSettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSettingsProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl SettingsProvider for FileSettingsProvider {
    async fn get_settings(&self) -> ConfigResult<Settings> {
        match self.load_raw()? {
            Some(serde_yaml::Value::Null) | None => Ok(Settings::default()),
            Some(value) => Ok(serde_yaml::from_value(value)?),
        }
    }

    async fn update_settings(&self, settings: Settings) -> ConfigResult<()> {
        self.save(&settings)
    }
}
