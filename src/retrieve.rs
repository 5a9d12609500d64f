// Retrieval orchestrator.
// Answers product lookups from the cache, falling back to one upstream fetch per id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use crate::cache::{CacheIndex, Entry, Partition, Store, paths};
use crate::config::{Config, MissingPolicy};
use crate::error::Result;
use crate::rainforest::{IdKind, ProductData, ProductFetcher, Variant};

/// Outcome of consulting the index alone.
enum CacheHit {
    Found(ProductData),
    Missing,
}

impl CacheHit {
    fn into_option(self) -> Option<ProductData> {
        match self {
            CacheHit::Found(data) => Some(data),
            CacheHit::Missing => None,
        }
    }
}

/// Counters for what lookups have done since the retriever was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrieveStats {
    /// Snapshots read back from disk.
    pub loads: u64,
    /// Lookups answered by a known-missing marker.
    pub missing_hits: u64,
    /// Requests sent to the provider.
    pub fetches: u64,
    /// Snapshots written to disk.
    pub stores: u64,
}

#[derive(Debug, Default)]
struct Counters {
    loads: AtomicU64,
    missing_hits: AtomicU64,
    fetches: AtomicU64,
    stores: AtomicU64,
}

/// Cache-first product lookups.
///
/// Concurrent callers asking for the same uncached id queue on a per-id lock and
/// re-check the index once they hold it, so a found product is fetched only once.
pub struct Retriever<F> {
    index: Arc<CacheIndex>,
    store: Store,
    fetcher: F,
    policy: MissingPolicy,
    inflight: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    counters: Counters,
}

impl<F: ProductFetcher> Retriever<F> {
    pub fn new(index: Arc<CacheIndex>, store: Store, fetcher: F, policy: MissingPolicy) -> Self {
        Self {
            index,
            store,
            fetcher,
            policy,
            inflight: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Build the index from the configured root and wrap it with a fetcher.
    pub fn open(config: &Config, fetcher: F) -> Result<Self> {
        let store = Store::new(config.root.clone());
        let index = CacheIndex::build(&store, config.partition_scan)?;
        Ok(Self::new(
            Arc::new(index),
            store,
            fetcher,
            config.missing_policy,
        ))
    }

    pub fn index(&self) -> &Arc<CacheIndex> {
        &self.index
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stats(&self) -> RetrieveStats {
        RetrieveStats {
            loads: self.counters.loads.load(Ordering::Relaxed),
            missing_hits: self.counters.missing_hits.load(Ordering::Relaxed),
            fetches: self.counters.fetches.load(Ordering::Relaxed),
            stores: self.counters.stores.load(Ordering::Relaxed),
        }
    }

    pub async fn retrieve_by_asin(&self, id: &str) -> Result<Option<ProductData>> {
        self.retrieve(id, IdKind::Asin).await
    }

    pub async fn retrieve_by_gtin(&self, id: &str) -> Result<Option<ProductData>> {
        self.retrieve(id, IdKind::Gtin).await
    }

    /// Retrieve a product, returning `None` when upstream has no such product.
    pub async fn retrieve(&self, id: &str, kind: IdKind) -> Result<Option<ProductData>> {
        paths::validate_id(id)?;
        if let Some(hit) = self.from_cache(id)? {
            return Ok(hit.into_option());
        }

        let lock = self.inflight_lock(id);
        let result = {
            let _guard = lock.lock().await;
            // Another caller may have filled the entry while we waited
            match self.from_cache(id) {
                Ok(Some(hit)) => Ok(hit.into_option()),
                Ok(None) => self.fetch_and_store(id, kind).await,
                Err(e) => Err(e),
            }
        };
        self.release_inflight(id, lock);
        result
    }

    /// Drop what the index knows about an id so the next retrieval goes upstream.
    ///
    /// Files already on disk are left in place; a later fetch overwrites them.
    pub fn invalidate(&self, id: &str) -> Option<Entry> {
        let previous = self.index.remove(id);
        if previous.is_some() {
            info!(id, "cache entry invalidated");
        }
        previous
    }

    /// Invalidate and retrieve again from upstream.
    pub async fn force_refetch(&self, id: &str, kind: IdKind) -> Result<Option<ProductData>> {
        self.invalidate(id);
        self.retrieve(id, kind).await
    }

    /// Persist the ids currently known to be missing.
    pub fn save_missing_manifest(&self) -> Result<()> {
        let ids = self.index.missing_ids();
        self.store.write_missing_manifest(&ids)?;
        info!(count = ids.len(), "missing manifest saved");
        Ok(())
    }

    fn from_cache(&self, id: &str) -> Result<Option<CacheHit>> {
        match self.index.lookup(id) {
            None => Ok(None),
            Some(Entry::Missing) => {
                debug!(id, "known missing");
                self.counters.missing_hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(CacheHit::Missing))
            }
            Some(Entry::Stored(path)) => {
                debug!(id, path = %path.display(), "cache hit");
                self.counters.loads.fetch_add(1, Ordering::Relaxed);
                let data = self.store.load(id, &path)?;
                Ok(Some(CacheHit::Found(data)))
            }
        }
    }

    async fn fetch_and_store(&self, id: &str, kind: IdKind) -> Result<Option<ProductData>> {
        info!(id, %kind, "retrieving from provider");
        self.counters.fetches.fetch_add(1, Ordering::Relaxed);
        let data = self.fetcher.fetch(kind, id).await?;

        if !data.is_found() {
            info!(id, %kind, "not found upstream");
            if self.policy.marks(kind) {
                self.index.upsert(id, Entry::Missing);
            }
            return Ok(None);
        }

        let path = self
            .index
            .persist(&self.store, Partition::current(), id, &data)?;
        self.counters.stores.fetch_add(1, Ordering::Relaxed);
        info!(id, path = %path.display(), "stored");
        Ok(Some(data))
    }

    fn inflight_lock(&self, id: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            map.entry(id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }

    fn release_inflight(&self, id: &str, lock: Arc<AsyncMutex<()>>) {
        let mut map = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this caller still hold it: nobody is waiting
        if Arc::strong_count(&lock) <= 2 {
            map.remove(id);
        }
    }
}

/// Find the first variant matching a candidate title, trying candidates in order.
pub fn lookup_variant<'a, S: AsRef<str>>(
    record: &'a ProductData,
    titles: &[S],
) -> Option<&'a Variant> {
    record.lookup_variant(titles)
}
