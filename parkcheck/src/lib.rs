//! ParkCheck - parking violation checks against OpenStreetMap data
//!
//! Given a coordinate, the library asks an Overpass API endpoint for nearby
//! traffic features (crossings, stops, traffic signals, tram tracks and so
//! on), classifies them and runs a table of distance rules to decide whether
//! stopping there breaks a parking rule. It also renders a PNG map of the
//! location from OpenStreetMap tiles with a marker at the point.
//!
//! # Modules
//!
//! - [`coord`] - Web-Mercator projection and distance math
//! - [`provider`] - HTTP clients and the slippy-map tile source
//! - [`geodata`] - Overpass query building and response classification
//! - [`rules`] - Violation rule table and evaluation
//! - [`cache`] - Tile store (disk or memory)
//! - [`render`] - Map composition and PNG encoding
//! - [`analysis`] - Validation and orchestration for checks and maps
//! - [`server`] - HTTP API (`/api/check`, `/api/map`, `/health`)
//! - [`config`] - `config.ini` loading and saving
//! - [`app`] - Wiring everything from configuration
//! - [`logging`] - Tracing subscriber setup

pub mod analysis;
pub mod app;
pub mod cache;
pub mod config;
pub mod coord;
pub mod geodata;
pub mod logging;
pub mod provider;
pub mod render;
pub mod rules;
pub mod server;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
