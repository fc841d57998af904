//! In-memory tile store using moka.
//!
//! Wraps `moka::future::Cache` to provide an async-safe in-memory store with
//! automatic LRU eviction, bounded by the total byte size of the stored tiles.
//! Useful when the host has no writable disk, and in tests.

use moka::future::Cache as MokaCache;

use crate::cache::traits::{BoxFuture, Cache, ServiceCacheError};

/// In-memory cache provider using moka.
pub struct MemoryCacheProvider {
    cache: MokaCache<String, Vec<u8>>,
    max_size_bytes: u64,
}

impl MemoryCacheProvider {
    /// Create a new memory cache provider bounded to `max_size_bytes`.
    pub fn new(max_size_bytes: u64) -> Self {
        let cache = MokaCache::builder()
            // Weight each entry by its data size
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                value.len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes)
            .build();

        Self {
            cache,
            max_size_bytes,
        }
    }

    /// Maximum configured size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Current weighted size of all entries.
    ///
    /// moka is eventually consistent; call [`Self::sync`] first for an exact
    /// figure.
    pub fn size_bytes(&self) -> u64 {
        self.cache.weighted_size()
    }

    /// Current number of entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run pending maintenance (evictions, size bookkeeping).
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Cache for MemoryCacheProvider {
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), ServiceCacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, value).await;
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, ServiceCacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await) })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.remove(&key).await.is_some()) })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.contains_key(&key)) })
    }

    fn name(&self) -> &str {
        "memory"
    }
}
