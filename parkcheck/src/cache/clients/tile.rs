//! Tile cache client for raster map tiles.
//!
//! This client wraps a generic `Cache` with:
//! - Key translation: `TileCoordinate` → `"{zoom}_{x}_{y}"`
//! - Error isolation: store failures are logged and never surface to callers
//!
//! The tile store is best-effort. A failed read degrades to a miss and a
//! failed write is dropped, so the renderer keeps working when the backing
//! storage is full or unavailable.

use std::sync::Arc;

use tracing::warn;

use crate::cache::traits::Cache;
use crate::coord::TileCoordinate;

/// Cache client for encoded map tiles.
#[derive(Clone)]
pub struct TileCacheClient {
    cache: Arc<dyn Cache>,
}

impl TileCacheClient {
    /// Create a new tile cache client.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.cache.name()
    }

    /// Get a tile from the cache.
    ///
    /// Returns `None` on a miss and on any store error.
    pub async fn get(&self, tile: &TileCoordinate) -> Option<Vec<u8>> {
        let key = tile.cache_key();
        match self.cache.get(&key).await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, key = %key, "Tile cache get failed");
                None
            }
        }
    }

    /// Store a tile in the cache, logging and swallowing failures.
    pub async fn set(&self, tile: &TileCoordinate, data: Vec<u8>) {
        let key = tile.cache_key();
        if let Err(e) = self.cache.set(&key, data).await {
            warn!(error = %e, key = %key, "Tile cache set failed");
        }
    }

    /// Check if a tile exists in the cache.
    pub async fn contains(&self, tile: &TileCoordinate) -> bool {
        let key = tile.cache_key();
        self.cache.contains(&key).await.unwrap_or(false)
    }

    /// Delete a tile from the cache.
    ///
    /// Returns `true` if the tile was deleted, `false` if it didn't exist.
    pub async fn delete(&self, tile: &TileCoordinate) -> bool {
        let key = tile.cache_key();
        self.cache.delete(&key).await.unwrap_or(false)
    }
}
