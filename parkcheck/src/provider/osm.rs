//! OpenStreetMap raster tile provider.
//!
//! # URL Pattern
//!
//! `{base}/{z}/{x}/{y}.png`, with the public default base
//! `https://tile.openstreetmap.org`.
//!
//! Any server speaking the standard XYZ scheme can be used by passing a
//! different base URL.
//!
//! # Terms of Use
//!
//! The public OSM tile servers require an identifying `User-Agent` and forbid
//! bulk downloading. See: <https://operations.osmfoundation.org/policies/tiles/>

use crate::cache::BoxFuture;
use crate::coord::TileCoordinate;
use crate::provider::{AsyncHttpClient, ProviderError, TileSource};

/// Base URL of the public OpenStreetMap tile server.
pub const OSM_BASE_URL: &str = "https://tile.openstreetmap.org";

/// Maximum zoom level served by the standard OSM tile layer.
const MAX_ZOOM: u8 = 19;

/// XYZ raster tile provider.
///
/// # Example
///
/// ```ignore
/// use parkcheck::provider::{AsyncReqwestClient, OsmTileProvider};
///
/// let client = AsyncReqwestClient::new()?;
/// let provider = OsmTileProvider::new(client);
/// ```
pub struct OsmTileProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> OsmTileProvider<C> {
    /// Creates a provider for the public OpenStreetMap tile server.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, OSM_BASE_URL)
    }

    /// Creates a provider for a custom XYZ tile server.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http_client,
            base_url,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the tile URL for the given coordinates.
    fn build_url(&self, tile: &TileCoordinate) -> String {
        format!("{}/{}/{}/{}.png", self.base_url, tile.zoom, tile.x, tile.y)
    }

    pub fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }

    async fn download(&self, tile: TileCoordinate) -> Result<Vec<u8>, ProviderError> {
        if tile.zoom > MAX_ZOOM {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        let url = self.build_url(&tile);
        self.http_client.get(&url).await
    }
}

impl<C: AsyncHttpClient> TileSource for OsmTileProvider<C> {
    fn fetch_tile(&self, tile: TileCoordinate) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
        Box::pin(self.download(tile))
    }

    fn name(&self) -> &str {
        "OpenStreetMap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    fn sample_png_response() -> Vec<u8> {
        // PNG signature
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    }

    #[test]
    fn test_provider_name() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::new(mock_client);
        assert_eq!(provider.name(), "OpenStreetMap");
        assert_eq!(provider.max_zoom(), 19);
    }

    #[test]
    fn test_url_construction() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::new(mock_client);

        let url = provider.build_url(&TileCoordinate::from_indices(17, 76543, 44321));
        assert_eq!(url, "https://tile.openstreetmap.org/17/76543/44321.png");
    }

    #[test]
    fn test_url_construction_zoom_0() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::new(mock_client);

        let url = provider.build_url(&TileCoordinate::from_indices(0, 0, 0));
        assert_eq!(url, "https://tile.openstreetmap.org/0/0/0.png");
    }

    #[test]
    fn test_custom_base_url_strips_trailing_slash() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::with_base_url(mock_client, "http://localhost:8081/tiles/");

        assert_eq!(provider.base_url(), "http://localhost:8081/tiles");
        let url = provider.build_url(&TileCoordinate::from_indices(3, 1, 2));
        assert_eq!(url, "http://localhost:8081/tiles/3/1/2.png");
    }

    #[tokio::test]
    async fn test_fetch_tile_success() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::new(mock_client);

        let result = provider
            .fetch_tile(TileCoordinate::from_indices(15, 200, 100))
            .await;
        assert_eq!(result.unwrap(), sample_png_response());
        assert_eq!(
            provider.http_client.requested_urls(),
            vec!["https://tile.openstreetmap.org/15/200/100.png"]
        );
    }

    #[tokio::test]
    async fn test_fetch_tile_unsupported_zoom() {
        let mock_client = MockAsyncHttpClient::returning(Ok(sample_png_response()));
        let provider = OsmTileProvider::new(mock_client);

        let result = provider
            .fetch_tile(TileCoordinate::from_indices(20, 0, 0))
            .await;
        match result {
            Err(ProviderError::UnsupportedZoom(zoom)) => assert_eq!(zoom, 20),
            _ => panic!("Expected UnsupportedZoom error"),
        }
        assert!(provider.http_client.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tile_network_error() {
        let mock_client = MockAsyncHttpClient::returning(Err(ProviderError::HttpError(
            "Connection refused".to_string(),
        )));
        let provider = OsmTileProvider::new(mock_client);

        let result = provider
            .fetch_tile(TileCoordinate::from_indices(15, 200, 100))
            .await;
        match result {
            Err(ProviderError::HttpError(msg)) => {
                assert!(msg.contains("Connection refused"));
            }
            _ => panic!("Expected HttpError"),
        }
    }
}
