//! Application bootstrap.
//!
//! Turns a [`ConfigFile`](crate::config::ConfigFile) into a ready-to-serve
//! [`AppState`](crate::server::AppState): HTTP clients, the Overpass client,
//! the tile provider, the optional tile store and the renderer.
//!
//! ```text
//! ConfigFile ──► AppConfig ──► ParkCheckApp::build
//!                                 ├── OverpassClient ──► ParkingAnalysisService
//!                                 └── OsmTileProvider + TileCacheClient
//!                                         └── MapRenderer ──► MapService
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::ParkCheckApp;
pub use config::{cache_backend, AppConfig};
pub use error::AppError;
