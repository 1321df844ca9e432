//! Preference persistence for stackread
//!
//! Preferences are a flat string key-value map. The store is a trait so the
//! parts that read and write preferences can be exercised without touching
//! the filesystem. File location: ~/.config/stackread/preferences.toml

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Durable key-value storage for user preferences
pub trait PreferenceStore {
    /// Read a stored value by key
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store persisting preferences as TOML
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlStore {
    /// Get the preference file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("stackread");
        Ok(config_dir.join("preferences.toml"))
    }

    /// Load the store from the default location
    ///
    /// A missing file yields an empty store. Nothing is written until the
    /// first `set`.
    pub fn load() -> Result<Self> {
        Self::at(Self::path()?)
    }

    /// Load the store from an explicit path
    pub fn at(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences from {:?}", path))?;

        let values = toml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences from {:?}", path))?;

        Ok(Self { path, values })
    }

    /// Write the current values to disk
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(&self.values)
            .context("Failed to serialize preferences")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;

        Ok(())
    }
}

impl PreferenceStore for TomlStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store for tests and `--ephemeral` runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
