//! Map tile provider abstraction
//!
//! This module provides the HTTP client abstraction shared by every upstream
//! call and the XYZ raster tile source used by the renderer.
//!
//! ```ignore
//! use std::sync::Arc;
//! use parkcheck::provider::{AsyncReqwestClient, OsmTileProvider, TileSource};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let tiles: Arc<dyn TileSource> = Arc::new(OsmTileProvider::new(http_client));
//! ```

mod http;
mod osm;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use osm::{OsmTileProvider, OSM_BASE_URL};
pub use types::{ProviderError, TileSource};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
