use crate::error::{Result, StoreError};
use crate::log::StoreLogger;
use crate::store::JsonStore;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR_ENV: &str = "JSONKEEP_CONFIG_DIR";

/// Settings for [`JsonStore`], stored in `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Create a missing target directory instead of failing the save
    #[serde(default)]
    pub create_dirs: bool,

    /// fsync the temp file before the rename, and the directory after it
    #[serde(default = "default_sync")]
    pub sync: bool,
}

fn default_sync() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_dirs: false,
            sync: default_sync(),
        }
    }
}

impl StoreConfig {
    /// Load config from `config_dir`, falling back to defaults if the file is
    /// missing or does not describe a config.
    pub fn load<L: StoreLogger>(store: &JsonStore<L>, config_dir: impl AsRef<Path>) -> Self {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        let doc = store.load(&path);
        match serde_json::from_value(doc) {
            Ok(config) => config,
            Err(e) => {
                store
                    .logger()
                    .debug(&format!("Ignoring config {}: {}", path.display(), e));
                Self::default()
            }
        }
    }

    /// Save config to `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: impl AsRef<Path>) -> Result<()> {
        let writer = JsonStore::with_config(StoreConfig {
            create_dirs: true,
            ..self.clone()
        });
        writer.try_save(config_dir.as_ref().join(CONFIG_FILENAME), self)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "create-dirs" => Some(self.create_dirs.to_string()),
            "sync" => Some(self.sync.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let flag = parse_flag(value)
            .ok_or_else(|| StoreError::Command(format!("Expected true or false, got {}", value)))?;
        match key {
            "create-dirs" => self.create_dirs = flag,
            "sync" => self.sync = flag,
            _ => return Err(StoreError::Command(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["create-dirs", "sync"]
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Where `config.json` lives: `$JSONKEEP_CONFIG_DIR`, else the platform
/// config directory.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "jsonkeep", "jsonkeep").map(|dirs| dirs.config_dir().to_path_buf())
}
