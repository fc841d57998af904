//! Application bootstrap implementation.

use std::sync::Arc;

use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::analysis::{MapService, ParkingAnalysisService};
use crate::cache::open_tile_cache;
use crate::geodata::OverpassClient;
use crate::provider::{AsyncReqwestClient, OsmTileProvider};
use crate::render::MapRenderer;
use crate::server::AppState;

/// Fully wired application, ready to be served.
///
/// # Example
///
/// ```ignore
/// use parkcheck::app::{AppConfig, ParkCheckApp};
///
/// let app = ParkCheckApp::build(AppConfig::default())?;
/// let result = app.analysis().analyze(50.4501, 30.5234).await?;
/// ```
pub struct ParkCheckApp {
    state: AppState,
    config: AppConfig,
}

impl ParkCheckApp {
    /// Builds every service from `config`.
    ///
    /// A tile store that cannot be opened is logged and skipped; maps are
    /// still rendered, just without caching.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created or the Overpass
    /// endpoint is not a valid URL.
    pub fn build(config: AppConfig) -> Result<Self, AppError> {
        let geodata_http =
            AsyncReqwestClient::with_settings(config.geodata_timeout, &config.geodata_user_agent)?;
        let overpass = OverpassClient::new(geodata_http, &config.geodata_endpoint)?;
        info!(endpoint = %overpass.endpoint(), "Geodata client ready");

        let tile_http =
            AsyncReqwestClient::with_settings(config.tile_timeout, &config.tile_user_agent)?;
        let tiles = OsmTileProvider::with_base_url(tile_http, &config.tile_url);
        info!(url = tiles.base_url(), "Tile provider ready");

        let mut renderer = MapRenderer::new(Arc::new(tiles))
            .with_max_concurrent_fetches(config.max_concurrent_fetches);
        match config.cache.as_ref().and_then(open_tile_cache) {
            Some(cache) => renderer = renderer.with_cache(cache),
            None => info!("Tile cache disabled"),
        }

        let state = AppState::new(
            ParkingAnalysisService::new(Arc::new(overpass)),
            MapService::new(renderer),
        )
        .with_request_timeout(config.request_timeout);

        Ok(Self { state, config })
    }

    pub fn analysis(&self) -> &ParkingAnalysisService {
        &self.state.analysis
    }

    pub fn maps(&self) -> &MapService {
        &self.state.maps
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handler state for [`crate::server::router`].
    pub fn state(&self) -> AppState {
        self.state.clone()
    }
}
