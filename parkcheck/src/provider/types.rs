//! Provider traits and errors.

use thiserror::Error;

use crate::cache::BoxFuture;
use crate::coord::TileCoordinate;

/// Errors from upstream HTTP providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The upstream answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The provider does not serve this zoom level.
    #[error("Unsupported zoom level: {0}")]
    UnsupportedZoom(u8),
}

/// Source of encoded raster tiles.
///
/// Dyn-compatible so the renderer can hold any source behind an
/// `Arc<dyn TileSource>`.
pub trait TileSource: Send + Sync {
    /// Downloads the encoded image bytes for one tile.
    fn fetch_tile(&self, tile: TileCoordinate) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
