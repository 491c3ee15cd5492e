//! Per-directory configuration.
//!
//! Every opened notes directory has its own [`NoteSearcherConfig`], keyed by
//! the directory path. Storage is behind the [`ConfigStore`] trait so the
//! orchestration layer never holds ambient global state; [`ConfigProvider`]
//! adds the enable/disable helpers on top.

use crate::error::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Search backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Use the out-of-process search backend instead of the in-process index
    pub use_lucene: bool,
}

/// Dead link reporting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeadLinksConfig {
    /// Report dead links every time a note is saved
    pub show_on_save: bool,
}

impl Default for DeadLinksConfig {
    fn default() -> Self {
        Self { show_on_save: true }
    }
}

/// Configuration recorded for one notes directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteSearcherConfig {
    pub enabled: bool,
    pub search: SearchConfig,
    pub dead_links: DeadLinksConfig,
}

/// Key-value store of configs, keyed by directory path.
pub trait ConfigStore: Send + Sync {
    /// Config recorded for `dir`, if any
    fn get(&self, dir: &str) -> Option<NoteSearcherConfig>;

    /// Record the config for `dir`
    fn set(&self, dir: &str, config: NoteSearcherConfig) -> Result<()>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: RwLock<BTreeMap<String, NoteSearcherConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, dir: &str) -> Option<NoteSearcherConfig> {
        self.entries.read().get(dir).cloned()
    }

    fn set(&self, dir: &str, config: NoteSearcherConfig) -> Result<()> {
        self.entries.write().insert(dir.to_string(), config);
        Ok(())
    }
}

/// Store persisted as one JSON object mapping directory to config.
///
/// The file is read on open and rewritten in full on every `set`. A `set`
/// whose write fails leaves the in-memory entries untouched.
#[derive(Debug)]
pub struct JsonFileConfigStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, NoteSearcherConfig>>,
}

impl JsonFileConfigStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                Error::config_error(format!("Invalid config file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(e)),
        };

        log::debug!(
            "Loaded {} directory configs from {}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, NoteSearcherConfig>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(Error::io)?;
        }

        // Write to temp file first, then rename into place
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(Error::io)?;
        std::fs::rename(&temp_path, &self.path).map_err(Error::io)?;
        Ok(())
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn get(&self, dir: &str) -> Option<NoteSearcherConfig> {
        self.entries.read().get(dir).cloned()
    }

    fn set(&self, dir: &str, config: NoteSearcherConfig) -> Result<()> {
        let mut entries = self.entries.write();
        let mut updated = entries.clone();
        updated.insert(dir.to_string(), config);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

/// Enable/disable helpers over a [`ConfigStore`].
#[derive(Clone)]
pub struct ConfigProvider {
    store: Arc<dyn ConfigStore>,
}

impl ConfigProvider {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Config for `dir`, or the defaults (disabled) if nothing was recorded
    pub fn config_for(&self, dir: &str) -> NoteSearcherConfig {
        self.store.get(dir).unwrap_or_default()
    }

    pub fn is_enabled_in_dir(&self, dir: &str) -> bool {
        self.config_for(dir).enabled
    }

    pub fn enable_in_dir(&self, dir: &str) -> Result<()> {
        self.set_enabled(dir, true)
    }

    pub fn disable_in_dir(&self, dir: &str) -> Result<()> {
        self.set_enabled(dir, false)
    }

    fn set_enabled(&self, dir: &str, enabled: bool) -> Result<()> {
        let mut config = self.config_for(dir);
        config.enabled = enabled;
        log::debug!("Setting enabled={} for {}", enabled, dir);
        self.store.set(dir, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = NoteSearcherConfig::default();
        assert!(!config.enabled);
        assert!(!config.search.use_lucene);
        assert!(config.dead_links.show_on_save);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: NoteSearcherConfig =
            serde_json::from_str(r#"{"enabled": true, "search": {"useLucene": true}}"#).unwrap();
        assert!(config.enabled);
        assert!(config.search.use_lucene);
        assert!(config.dead_links.show_on_save);
    }

    #[test]
    fn test_provider_enable_disable() {
        let provider = ConfigProvider::new(Arc::new(MemoryConfigStore::new()));
        assert!(!provider.is_enabled_in_dir("/notes"));

        provider.enable_in_dir("/notes").unwrap();
        assert!(provider.is_enabled_in_dir("/notes"));
        assert!(!provider.is_enabled_in_dir("/other"));

        provider.disable_in_dir("/notes").unwrap();
        assert!(!provider.is_enabled_in_dir("/notes"));
    }

    #[test]
    fn test_enable_keeps_other_settings() {
        let store = Arc::new(MemoryConfigStore::new());
        let mut config = NoteSearcherConfig::default();
        config.dead_links.show_on_save = false;
        store.set("/notes", config).unwrap();

        let provider = ConfigProvider::new(store);
        provider.enable_in_dir("/notes").unwrap();

        let config = provider.config_for("/notes");
        assert!(config.enabled);
        assert!(!config.dead_links.show_on_save);
    }

    #[test]
    fn test_json_store_round_trips_through_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.json");

        let store = JsonFileConfigStore::open(&path).unwrap();
        assert!(store.get("/notes").is_none());
        ConfigProvider::new(Arc::new(store))
            .enable_in_dir("/notes")
            .unwrap();

        let reopened = JsonFileConfigStore::open(&path).unwrap();
        assert!(reopened.get("/notes").unwrap().enabled);
    }

    #[test]
    fn test_json_store_failed_write_keeps_previous_config() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        let store = JsonFileConfigStore::open(&path).unwrap();

        let provider = ConfigProvider::new(Arc::new(store));
        provider.enable_in_dir("/notes").unwrap();

        // The temp file used for the atomic write cannot be created
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(provider.disable_in_dir("/notes").is_err());
        assert!(provider.is_enabled_in_dir("/notes"));
        assert!(JsonFileConfigStore::open(&path).unwrap().get("/notes").unwrap().enabled);
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));
    }
}
