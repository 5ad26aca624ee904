//! Durable key-value preferences

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A small string-to-string store for user preferences
pub trait PreferenceStore {
    /// Read a value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a JSON object on disk
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at `path`. A missing file is an empty store; a
    /// corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring unreadable preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// Open `preferences.json` inside the given directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::open(dir.join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Preferences that live only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
    /// Number of writes that changed a value
    pub writes: usize,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a single stored value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.writes += 1;
        }
        Ok(())
    }
}
