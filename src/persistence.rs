//! Key-value preference store
//!
//! The settings core never assumes a key is present: reads take a fallback and
//! writes are fire-and-forget from the caller's point of view.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::{SettingsError, SettingsResult};

/// Storage backend for primitive preference values
pub trait PersistenceStore {
    /// Raw stored value for `key`, if any
    fn load(&self, key: &str) -> Option<Value>;

    /// Durably record `value` under `key`
    fn store(&mut self, key: &str, value: Value) -> Result<()>;

    /// Typed read. A value of the wrong type counts as missing.
    fn try_get<T: DeserializeOwned>(&self, key: &str) -> SettingsResult<T> {
        let missing = || SettingsError::MissingPreference { key: key.to_string() };
        let value = self.load(key).ok_or_else(missing)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            warn!(key = %key, stored = %value, error = %e, "Stored preference has unexpected type, ignoring");
            missing()
        })
    }

    /// Typed read falling back to `fallback` when nothing usable is stored
    fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.try_get(key).unwrap_or_else(|err| {
            debug!(error = %err, "Using default preference");
            fallback
        })
    }

    fn try_set<T: Serialize>(&mut self, key: &str, value: T) -> SettingsResult<()> {
        let persistence = |source: anyhow::Error| SettingsError::Persistence { key: key.to_string(), source };
        let value = serde_json::to_value(value)
            .context("Failed to encode preference value")
            .map_err(persistence)?;
        self.store(key, value).map_err(persistence)
    }

    /// Fire-and-forget write: failures are logged, never surfaced
    fn set<T: Serialize>(&mut self, key: &str, value: T) {
        if let Err(err) = self.try_set(key, value) {
            error!(error = ?err, "Preference write failed, keeping in-memory value");
        }
    }
}

/// In-process store, used for tests and ephemeral sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of a stored value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk, rewritten on every write
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Open the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read_values(&path) {
            Ok(Some(values)) => {
                info!(path = %path.display(), count = values.len(), "Loaded stored preferences");
                values
            }
            Ok(None) => {
                info!(path = %path.display(), "No preference file found, starting with defaults");
                Map::new()
            }
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to read preference file, starting with defaults");
                Map::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(path: &Path) -> Result<Option<Map<String, Value>>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences from {:?}", path))?;
        let values = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
        Ok(Some(values))
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize preferences to JSON")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;
        Ok(())
    }
}

impl PersistenceStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_returns_fallback() {
        let store = MemoryStore::new();
        assert!(!store.get("gt-enabled", false));
        assert_eq!(store.get("gt-borderColor", "lightblue".to_string()), "lightblue");
    }

    #[test]
    fn test_try_get_missing_key_is_missing_preference() {
        let store = MemoryStore::new();
        let result = store.try_get::<bool>("autoSwitchLNMTL");
        assert!(matches!(result, Err(SettingsError::MissingPreference { key }) if key == "autoSwitchLNMTL"));
    }

    #[test]
    fn test_get_wrong_type_falls_back() {
        // A string where a bool is expected is treated as absent
        let store = MemoryStore::new().with("gt-enabled", "yes");
        assert!(!store.get("gt-enabled", false));
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("rv-selectedTheme", "LNMTL_ZN");
        store.set("rv-enabled", true);

        assert_eq!(store.get("rv-selectedTheme", String::new()), "LNMTL_ZN");
        assert!(store.get("rv-enabled", false));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("settings.json"));
        assert!(store.load("gt-enabled").is_none());
    }

    #[test]
    fn test_json_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonFileStore::open(&path);
        store.set("gt-borderColor", "#123456");
        store.set("autoSwitchLNMTL", true);
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("gt-borderColor", String::new()), "#123456");
        assert!(reopened.get("autoSwitchLNMTL", false));
    }

    #[test]
    fn test_json_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.load("gt-enabled").is_none());
        assert_eq!(store.get("gt-selectedTheme", "Default".to_string()), "Default");
    }
}
