//! Tile store.
//!
//! A small key-value abstraction ([`Cache`]) with disk and in-memory
//! providers, and a [`TileCacheClient`] that speaks in tile coordinates.
//!
//! Only raw upstream tile bytes are cached; rendered maps never are.

pub mod clients;
pub mod providers;
mod traits;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

pub use clients::TileCacheClient;
pub use providers::{DiskCacheProvider, DiskCacheStats, MemoryCacheProvider};
pub use traits::{BoxFuture, Cache, ServiceCacheError};

/// Which provider backs the tile store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// One file per tile under a directory.
    Disk { directory: PathBuf },
    /// Bounded in-memory LRU.
    Memory { max_size_bytes: u64 },
}

/// Opens the tile store for the given backend.
///
/// If the disk directory cannot be created the error is logged and `None`
/// is returned: the service keeps running with caching disabled.
pub fn open_tile_cache(backend: &CacheBackend) -> Option<TileCacheClient> {
    match backend {
        CacheBackend::Disk { directory } => match DiskCacheProvider::open(directory.clone()) {
            Ok(provider) => {
                info!(directory = %directory.display(), "Tile cache enabled (disk)");
                Some(TileCacheClient::new(Arc::new(provider)))
            }
            Err(e) => {
                warn!(
                    error = %e,
                    directory = %directory.display(),
                    "Tile caching disabled because the cache directory cannot be created"
                );
                None
            }
        },
        CacheBackend::Memory { max_size_bytes } => {
            info!(max_size_bytes, "Tile cache enabled (memory)");
            Some(TileCacheClient::new(Arc::new(MemoryCacheProvider::new(
                *max_size_bytes,
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_disk_cache_creates_directory() {
        let dir = TempDir::new().unwrap();
        let directory = dir.path().join("tiles");

        let client = open_tile_cache(&CacheBackend::Disk {
            directory: directory.clone(),
        });

        assert!(client.is_some());
        assert!(directory.is_dir());
    }

    #[test]
    fn test_open_disk_cache_disabled_when_directory_unavailable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let client = open_tile_cache(&CacheBackend::Disk {
            directory: blocker.join("tiles"),
        });

        assert!(client.is_none());
    }

    #[tokio::test]
    async fn test_open_memory_cache() {
        let client = open_tile_cache(&CacheBackend::Memory {
            max_size_bytes: 1024,
        })
        .unwrap();
        assert_eq!(client.provider_name(), "memory");
    }
}
