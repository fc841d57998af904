//! Application configuration for `ParkCheckApp`.
//!
//! [`AppConfig`] is the resolved, typed view of the INI settings that the
//! bootstrap needs.

use std::time::Duration;

use crate::cache::CacheBackend;
use crate::config::{CacheBackendKind, CacheSettings, ConfigFile};

/// Everything needed to build a [`ParkCheckApp`](super::ParkCheckApp).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub geodata_endpoint: String,
    pub geodata_timeout: Duration,
    pub geodata_user_agent: String,

    pub tile_url: String,
    pub tile_timeout: Duration,
    pub tile_user_agent: String,
    /// Tiles loaded concurrently per map.
    pub max_concurrent_fetches: usize,

    /// Tile store, or `None` when caching is disabled.
    pub cache: Option<CacheBackend>,

    /// Deadline for each check and map request.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            geodata_endpoint: config.geodata.endpoint.clone(),
            geodata_timeout: Duration::from_secs(config.geodata.timeout),
            geodata_user_agent: config.geodata.user_agent.clone(),
            tile_url: config.tiles.url.clone(),
            tile_timeout: Duration::from_secs(config.tiles.timeout),
            tile_user_agent: config.tiles.user_agent.clone(),
            max_concurrent_fetches: config.tiles.parallel,
            cache: cache_backend(&config.cache),
            request_timeout: Duration::from_secs(config.server.request_timeout),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}

/// Tile store selected by the `[cache]` section.
pub fn cache_backend(settings: &CacheSettings) -> Option<CacheBackend> {
    if !settings.enabled {
        return None;
    }
    Some(match settings.backend {
        CacheBackendKind::Disk => CacheBackend::Disk {
            directory: settings.directory.clone(),
        },
        CacheBackendKind::Memory => CacheBackend::Memory {
            max_size_bytes: settings.memory_size,
        },
    })
}
