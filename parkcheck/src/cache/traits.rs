//! Core traits for the tile store.
//!
//! The `Cache` trait provides a domain-agnostic key-value interface. Providers
//! (disk, memory) implement it so the renderer can use any backend through
//! the same interface.
//!
//! # Design Principles
//!
//! - **String keys**: Human-readable for debugging, flexible for any domain
//! - **Vec<u8> values**: Raw bytes, no serialization opinions imposed
//! - **Minimal interface**: Only essential operations, no domain-specific concerns
//! - **Dyn-compatible**: Uses `Pin<Box<dyn Future>>` for trait object support
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use parkcheck::cache::{Cache, MemoryCacheProvider};
//!
//! let cache: Arc<dyn Cache> = Arc::new(MemoryCacheProvider::new(64 * 1024 * 1024));
//! cache.set("17_76543_44321", vec![1, 2, 3]).await?;
//! let value = cache.get("17_76543_44321").await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum ServiceCacheError {
    /// I/O error during cache operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be stored by this provider.
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Provider-specific error.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Generic cache interface for key-value storage.
///
/// Providers implement this trait to offer caching capabilities. Domain
/// concepts like tile coordinates are handled by client layers such as
/// [`TileCacheClient`](crate::cache::TileCacheClient).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
/// Concurrent `set` calls for the same key must be safe; the last writer
/// wins.
pub trait Cache: Send + Sync {
    /// Store a value with the given key, replacing any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), ServiceCacheError>>;

    /// Retrieve a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` if the key exists
    /// - `Ok(None)` if the key is not found
    /// - `Err(_)` if an error occurs
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, ServiceCacheError>>;

    /// Delete a value by key.
    ///
    /// Returns `Ok(true)` if the key existed and was deleted.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>>;

    /// Check if a key exists without retrieving the value.
    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>>;

    /// Short provider name for logs ("disk", "memory").
    fn name(&self) -> &str;
}
