//! Key-value settings store: a hot DashMap cache in front of a sled tree.
//!
//! The repository writes whole-collection blobs under three fixed keys. The
//! store only moves bytes; encoding lives in [`crate::codec`].

use dashmap::DashMap;
use sled::{Db, Tree};
use std::path::Path;
use std::sync::Arc;

/// Key for the serialized profile (absent until the first save).
pub const PROFILE_KEY: &str = "userProfile";
/// Key for the serialized list of odyssey plans.
pub const PLANS_KEY: &str = "odysseyPlans";
/// Key for the serialized value-card catalog.
pub const VALUE_CARDS_KEY: &str = "valueCards";

const SETTINGS_TREE: &str = "settings";

/// Byte-level settings store. `set` must be durable enough that a following
/// `get` in the same process observes it.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, sled::Error>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), sled::Error>;
}

/// Sled-backed settings with an in-memory read cache.
pub struct SledSettingsStore {
    db: Db,
    tree: Tree,
    cache: Arc<DashMap<String, Vec<u8>>>,
}

impl SledSettingsStore {
    /// Opens or creates the sled database at `path`.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, sled::Error> {
        let db = sled::open(path)?;
        let tree = db.open_tree(SETTINGS_TREE)?;
        Ok(Self {
            db,
            tree,
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Blocks until all pending writes are on disk.
    pub fn flush(&self) -> Result<usize, sled::Error> {
        self.db.flush()
    }
}

impl SettingsStore for SledSettingsStore {
    /// Checks the hot cache first, then sled.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, sled::Error> {
        if let Some(v) = self.cache.get(key) {
            return Ok(Some(v.clone()));
        }
        let out = self.tree.get(key.as_bytes())?.map(|iv| iv.to_vec());
        if let Some(ref bytes) = out {
            self.cache.insert(key.to_string(), bytes.clone());
        }
        Ok(out)
    }

    /// Writes to sled, then to the hot cache.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), sled::Error> {
        let prev = self.tree.insert(key.as_bytes(), value)?;
        self.cache.insert(key.to_string(), value.to_vec());
        tracing::debug!(
            target: "lifeplan::store",
            key = key,
            bytes = value.len(),
            action = if prev.is_some() { "UPDATE" } else { "INSERT" },
            "settings blob written"
        );
        Ok(())
    }
}

/// Volatile store for tests and previews.
#[derive(Default, Clone)]
pub struct MemorySettingsStore {
    entries: Arc<DashMap<String, Vec<u8>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, sled::Error> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), sled::Error> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, sled::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), sled::Error> {
        (**self).set(key, value)
    }
}
