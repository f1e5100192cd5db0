//! Best-effort persistence for the configuration and the generated grid.
//!
//! Two records are kept, keyed independently: the configuration and the
//! last generated grid.  A grid record is only valid while the stored
//! configuration fingerprint matches the live one; any config change
//! deletes it.  Storage failures never escape the gateway; a restricted
//! environment leaves the session running purely in-memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::ConfigRecord;
use crate::errors::StorageError;
use crate::essential::GridState;

pub const CONFIG_KEY: &str = "sbbox.config.v1";
pub const GRID_KEY: &str = "sbbox.grid.v1";

/// Minimal key-value contract the gateway runs against.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and storage-less sessions.
#[derive(Default, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key under a spool directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// The grid record: a generated grid plus the fingerprint of the
/// configuration that produced it.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    pub config_fingerprint: String,
    pub grid_state: GridState,
    pub saved_at: u64,
}

/// Owns the persisted configuration/grid pair and the stale-grid
/// invalidation rule.
pub struct PersistenceGateway {
    store: Box<dyn KvStore>,
    last_fingerprint: Option<String>,
}

impl PersistenceGateway {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self {
            store,
            last_fingerprint: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryStore>::default())
    }

    /// Persist the configuration.  A changed fingerprint deletes the
    /// stored grid first, before a new grid exists to replace it.
    pub fn save_config(&mut self, record: &ConfigRecord) {
        let fingerprint = record.fingerprint();
        let changed = self
            .last_fingerprint
            .as_deref()
            .is_some_and(|last| last != fingerprint);
        if changed {
            if let Err(e) = self.store.remove(GRID_KEY) {
                warn!("failed to invalidate stored grid: {e}");
            }
        }
        // The record's serialized form and the fingerprint are the same
        // string, so one write covers both.
        if let Err(e) = self.store.put(CONFIG_KEY, &fingerprint) {
            warn!("failed to save config: {e}");
        }
        self.last_fingerprint = Some(fingerprint);
    }

    /// Persist a generated grid under the current fingerprint.
    pub fn save_grid(&mut self, grid: &GridState, now_ms: u64) {
        let Some(config_fingerprint) = self.last_fingerprint.clone() else {
            return;
        };
        let record = GridRecord {
            config_fingerprint,
            grid_state: grid.clone(),
            saved_at: now_ms,
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.store.put(GRID_KEY, &json) {
                    warn!("failed to save grid: {e}");
                }
            }
            Err(e) => warn!("failed to serialize grid: {e}"),
        }
    }

    /// The stored configuration, if present and parseable.  Primes the
    /// fingerprint used by the invalidation check.
    pub fn load_config(&mut self) -> Option<ConfigRecord> {
        let raw = match self.store.get(CONFIG_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read config: {e}");
                return None;
            }
        };
        let record: ConfigRecord = serde_json::from_str(&raw).ok()?;
        self.last_fingerprint = Some(record.fingerprint());
        Some(record)
    }

    /// The stored grid, only while its fingerprint still equals the
    /// given configuration's.
    pub fn load_grid_if_matching(&self, current: &ConfigRecord) -> Option<GridState> {
        let raw = match self.store.get(GRID_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read grid: {e}");
                return None;
            }
        };
        let record: GridRecord = serde_json::from_str(&raw).ok()?;
        (record.config_fingerprint == current.fingerprint()).then_some(record.grid_state)
    }
}
