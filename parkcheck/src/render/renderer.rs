//! Map renderer.
//!
//! Stitches XYZ tiles into a square PNG centered on a point:
//!
//! 1. Compute the viewport and the tiles covering it
//! 2. Load each distinct tile, cache first, with bounded concurrency
//! 3. Composite tiles and draw the marker on the blocking pool
//! 4. Encode PNG
//!
//! Tile failures are not fatal: a tile that cannot be loaded or decoded is
//! logged and its region stays transparent.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, info, warn};

use super::error::RenderError;
use super::marker::{draw_marker, marker_radius};
use super::viewport::{TilePlacement, Viewport};
use crate::cache::TileCacheClient;
use crate::coord::{TileCoordinate, MAX_ZOOM};
use crate::provider::TileSource;

/// Default number of tiles loaded concurrently per render.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// An encoded map image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMap {
    /// PNG bytes.
    pub data: Vec<u8>,
    /// Suggested download name, `map_z{zoom}_{lat}_{lon}.png`.
    pub file_name: String,
}

/// Builds the suggested file name from the request coordinates as given.
pub fn map_file_name(lat: f64, lon: f64, zoom: u8) -> String {
    format!("map_z{}_{:.4}_{:.4}.png", zoom, lat, lon)
}

/// Renders maps from a tile source with an optional tile cache.
#[derive(Clone)]
pub struct MapRenderer {
    source: Arc<dyn TileSource>,
    cache: Option<TileCacheClient>,
    max_concurrent_fetches: usize,
}

impl MapRenderer {
    /// Creates a renderer without a tile cache.
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        Self {
            source,
            cache: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Uses `cache` for tile reads and writes.
    pub fn with_cache(mut self, cache: TileCacheClient) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Limits how many tiles are loaded at once. Zero is treated as one.
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Renders a `image_size`×`image_size` PNG centered on `(lat, lon)`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a zero size, a zoom above 19 or non-finite
    ///   coordinates
    /// - `Encode`/`Worker` if the final image cannot be produced
    pub async fn render(
        &self,
        lat: f64,
        lon: f64,
        zoom: u8,
        image_size: u32,
    ) -> Result<RenderedMap, RenderError> {
        if image_size == 0 {
            return Err(RenderError::InvalidParameter(
                "image size must be positive".to_string(),
            ));
        }
        if zoom > MAX_ZOOM {
            return Err(RenderError::InvalidParameter(format!(
                "zoom {} exceeds maximum {}",
                zoom, MAX_ZOOM
            )));
        }
        if !lat.is_finite() || !lon.is_finite() {
            return Err(RenderError::InvalidParameter(
                "coordinates must be finite".to_string(),
            ));
        }

        let viewport = Viewport::new(lat, lon, zoom, image_size);
        let placements = viewport.tile_placements();
        let tiles = self.load_tiles(&placements).await;

        debug!(
            zoom,
            image_size,
            placements = placements.len(),
            loaded = tiles.len(),
            "Compositing map"
        );

        let data = tokio::task::spawn_blocking(move || compose(&viewport, &placements, &tiles))
            .await
            .map_err(|e| RenderError::Worker(e.to_string()))??;

        info!(zoom, image_size, bytes = data.len(), "Rendered map");

        Ok(RenderedMap {
            data,
            file_name: map_file_name(lat, lon, zoom),
        })
    }

    /// Loads every distinct tile once. Failed tiles are absent from the map.
    async fn load_tiles(
        &self,
        placements: &[TilePlacement],
    ) -> HashMap<TileCoordinate, RgbaImage> {
        let mut seen = HashSet::new();
        let unique: Vec<TileCoordinate> = placements
            .iter()
            .map(|p| p.tile)
            .filter(|tile| seen.insert(*tile))
            .collect();

        stream::iter(unique)
            .map(|tile| async move { (tile, self.load_tile(tile).await) })
            .buffer_unordered(self.max_concurrent_fetches)
            .filter_map(|(tile, image)| async move { image.map(|image| (tile, image)) })
            .collect()
            .await
    }

    async fn load_tile(&self, tile: TileCoordinate) -> Option<RgbaImage> {
        if let Some(cache) = &self.cache {
            if let Some(bytes) = cache.get(&tile).await {
                let (_, decoded) = decode_tile(bytes).await;
                match decoded {
                    Some(image) => return Some(image),
                    None => warn!(tile = %tile, "Cached tile is unreadable, refetching"),
                }
            }
        }

        let bytes = match self.source.fetch_tile(tile).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(tile = %tile, source = self.source.name(), error = %e, "Tile fetch failed");
                return None;
            }
        };

        let (bytes, decoded) = decode_tile(bytes).await;
        let Some(image) = decoded else {
            warn!(tile = %tile, bytes = bytes.len(), "Fetched tile could not be decoded");
            return None;
        };

        if let Some(cache) = &self.cache {
            cache.set(&tile, bytes).await;
        }
        Some(image)
    }
}

/// Decodes tile bytes on the blocking pool, handing the bytes back.
async fn decode_tile(bytes: Vec<u8>) -> (Vec<u8>, Option<RgbaImage>) {
    let result = tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&bytes).map(|image| image.to_rgba8());
        (bytes, decoded)
    })
    .await;

    match result {
        Ok((bytes, Ok(image))) => (bytes, Some(image)),
        Ok((bytes, Err(e))) => {
            debug!(error = %e, "Tile decode failed");
            (bytes, None)
        }
        Err(e) => {
            warn!(error = %e, "Tile decode worker failed");
            (Vec::new(), None)
        }
    }
}

/// Draws tiles and the marker onto a transparent canvas and encodes PNG.
fn compose(
    viewport: &Viewport,
    placements: &[TilePlacement],
    tiles: &HashMap<TileCoordinate, RgbaImage>,
) -> Result<Vec<u8>, RenderError> {
    let mut canvas = RgbaImage::new(viewport.size, viewport.size);

    for placement in placements {
        if let Some(tile) = tiles.get(&placement.tile) {
            imageops::replace(&mut canvas, tile, placement.offset_x, placement.offset_y);
        }
    }

    draw_marker(
        &mut canvas,
        viewport.marker_x,
        viewport.marker_y,
        marker_radius(viewport.size),
    );

    let mut data = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
    Ok(data)
}
