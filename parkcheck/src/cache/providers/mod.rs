//! Cache provider implementations.
//!
//! Each provider implements the `Cache` trait.
//!
//! # Available Providers
//!
//! - [`DiskCacheProvider`]: one file per tile under a cache directory
//! - [`MemoryCacheProvider`]: in-memory LRU cache using moka

mod disk;
mod memory;

pub use disk::{DiskCacheProvider, DiskCacheStats};
pub use memory::MemoryCacheProvider;
