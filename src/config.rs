//! Configuration management for daybook.
//!
//! Settings live in `config.yaml` inside the data directory (see
//! [`crate::paths`]). Every field has a default, so an empty or partial file
//! is valid.

use crate::error::Result;
use crate::paths;
use crate::tasks::{JsonDirTaskStore, MemoryTaskStore, SqliteTaskStore, TaskStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which storage backend holds the task lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// A single `SQLite` database file.
    #[default]
    Sqlite,
    /// One JSON file per day.
    JsonDir,
    /// Nothing is kept once the process exits.
    Memory,
}

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Storage backend for task lists.
    #[serde(default)]
    pub backend: Backend,

    /// Where task data is stored. None means the config's own directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Append every action to `actions.jsonl` for debugging.
    #[serde(default)]
    pub debug_logging: bool,

    /// Directory of `.tera` files overriding the built-in screen layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from a base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = paths::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = paths::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// The directory task data is stored in.
    #[must_use]
    pub fn storage_dir(&self, base_dir: &Path) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| base_dir.to_path_buf())
    }

    /// Open the configured task store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be initialized.
    pub fn open_store(&self, base_dir: &Path) -> Result<Box<dyn TaskStore>> {
        let storage_dir = self.storage_dir(base_dir);
        let store: Box<dyn TaskStore> = match self.backend {
            Backend::Sqlite => Box::new(SqliteTaskStore::new(paths::database_path(&storage_dir))?),
            Backend::JsonDir => Box::new(JsonDirTaskStore::new(paths::days_dir(&storage_dir))),
            Backend::Memory => Box::new(MemoryTaskStore::new()),
        };
        log::debug!("Opened {:?} task store in {}", self.backend, storage_dir.display());
        Ok(store)
    }
}

/// Ensure config exists in a base directory, creating it with defaults if not.
///
/// Returns the config (either loaded or newly created).
///
/// # Errors
///
/// Returns an error if config cannot be loaded or saved.
pub fn ensure_config_in(base_dir: &Path) -> Result<Config> {
    if let Some(config) = Config::load_from(base_dir)? {
        return Ok(config);
    }

    let config = Config::default();
    config.save_to(base_dir)?;
    Ok(config)
}
