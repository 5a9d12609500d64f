// In-memory cache index.
// Maps product ids to their snapshot file or the known-missing marker, behind one RwLock.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::config::PartitionScan;
use crate::error::Result;
use crate::rainforest::ProductData;

use super::paths::Partition;
use super::store::Store;

/// What the index knows about one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Snapshot stored at this path.
    Stored(PathBuf),
    /// Upstream has confirmed there is no such product.
    Missing,
}

/// Process-wide id → entry map, rebuilt from the store at startup.
#[derive(Debug, Default)]
pub struct CacheIndex {
    entries: RwLock<HashMap<String, Entry>>,
}

impl CacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from disk: partition files first, then the missing manifest on top.
    pub fn build(store: &Store, scan: PartitionScan) -> Result<Self> {
        let partitions = match scan {
            PartitionScan::CurrentMonth => vec![Partition::current()],
            PartitionScan::All => store.partitions()?,
        };

        let mut entries = HashMap::new();
        for partition in partitions {
            for (id, path) in store.scan_partition(partition)? {
                entries.insert(id, Entry::Stored(path));
            }
        }

        let missing = store.read_missing_manifest()?;
        let missing_count = missing.len();
        for id in missing {
            entries.insert(id, Entry::Missing);
        }

        info!(
            root = %store.root().display(),
            entries = entries.len(),
            missing = missing_count,
            "cache index built"
        );
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Look up an id.
    pub fn lookup(&self, id: &str) -> Option<Entry> {
        self.read().get(id).cloned()
    }

    /// Set or overwrite the entry for an id.
    pub fn upsert(&self, id: &str, entry: Entry) {
        self.write().insert(id.to_string(), entry);
    }

    /// Forget an id so the next retrieval goes upstream.
    pub fn remove(&self, id: &str) -> Option<Entry> {
        self.write().remove(id)
    }

    /// Write a snapshot and record it, holding the write lock for both steps.
    pub fn persist(
        &self,
        store: &Store,
        partition: Partition,
        id: &str,
        data: &ProductData,
    ) -> Result<PathBuf> {
        let mut entries = self.write();
        let path = store.save(partition, id, data)?;
        entries.insert(id.to_string(), Entry::Stored(path.clone()));
        Ok(path)
    }

    /// Ids currently marked missing, sorted.
    pub fn missing_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, entry)| **entry == Entry::Missing)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
