//! Domain-specific cache clients.
//!
//! These clients wrap the generic `Cache` trait with domain-specific key
//! translation and error handling.
//!
//! ```text
//! ┌─────────────────────┐
//! │  TileCacheClient    │
//! │                     │
//! │ TileCoordinate→key  │
//! │ errors → warn logs  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Arc<dyn Cache>                     │
//! │                                                 │
//! │  Generic key-value store (string → Vec<u8>)    │
//! └─────────────────────────────────────────────────┘
//! ```

mod tile;

pub use tile::TileCacheClient;
