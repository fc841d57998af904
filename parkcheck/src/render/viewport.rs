//! Viewport geometry: which tiles cover the image and where each one lands.

use crate::coord::{
    clamp_latitude, normalize_longitude, project, world_size, TileCoordinate, TILE_SIZE,
};

/// A square window onto the world raster, centered on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: u8,
    /// Edge length of the output image in pixels.
    pub size: u32,
    /// World-pixel position of the image's top-left corner.
    ///
    /// X is not clamped and may be negative or exceed the world width near
    /// the antimeridian. Y is clamped so the window stays inside the world
    /// whenever the world is taller than the window.
    pub origin_x: i64,
    pub origin_y: i64,
    /// Marker position in image pixels.
    pub marker_x: i64,
    pub marker_y: i64,
}

/// A tile and the image-space position of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub tile: TileCoordinate,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl Viewport {
    /// Centers a `size`×`size` window on the given coordinates.
    ///
    /// Latitude is clamped to the Web Mercator range and longitude is
    /// normalized before projecting.
    pub fn new(lat: f64, lon: f64, zoom: u8, size: u32) -> Self {
        let center = project(clamp_latitude(lat), normalize_longitude(lon), zoom);
        let world = world_size(zoom);
        let half = size as f64 / 2.0;
        let max_top = (world - size as f64).max(0.0);

        let top_left_x = center.x - half;
        let top_left_y = (center.y - half).clamp(0.0, max_top);

        let origin_x = top_left_x.round() as i64;
        let origin_y = top_left_y.round() as i64;

        Self {
            zoom,
            size,
            origin_x,
            origin_y,
            marker_x: (center.x - origin_x as f64).round() as i64,
            marker_y: (center.y - origin_y as f64).round() as i64,
        }
    }

    /// Every tile covering the window, row by row, with its draw offset.
    ///
    /// Tile X wraps around the antimeridian and tile Y is clamped, so the
    /// same tile may appear more than once at small zoom levels.
    pub fn tile_placements(&self) -> Vec<TilePlacement> {
        let tile = TILE_SIZE as i64;
        let last = self.size as i64 - 1;

        let start_x = self.origin_x.div_euclid(tile);
        let end_x = (self.origin_x + last).div_euclid(tile);
        let start_y = self.origin_y.div_euclid(tile);
        let end_y = (self.origin_y + last).div_euclid(tile);

        let mut placements = Vec::new();
        for ty in start_y..=end_y {
            for tx in start_x..=end_x {
                placements.push(TilePlacement {
                    tile: TileCoordinate::from_indices(self.zoom, tx, ty),
                    offset_x: tx * tile - self.origin_x,
                    offset_y: ty * tile - self.origin_y,
                });
            }
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_viewport_at_zoom_1() {
        let viewport = Viewport::new(0.0, 0.0, 1, 256);

        assert_eq!((viewport.origin_x, viewport.origin_y), (128, 128));
        assert_eq!((viewport.marker_x, viewport.marker_y), (128, 128));

        let placements = viewport.tile_placements();
        assert_eq!(
            placements,
            vec![
                TilePlacement {
                    tile: TileCoordinate::from_indices(1, 0, 0),
                    offset_x: -128,
                    offset_y: -128
                },
                TilePlacement {
                    tile: TileCoordinate::from_indices(1, 1, 0),
                    offset_x: 128,
                    offset_y: -128
                },
                TilePlacement {
                    tile: TileCoordinate::from_indices(1, 0, 1),
                    offset_x: -128,
                    offset_y: 128
                },
                TilePlacement {
                    tile: TileCoordinate::from_indices(1, 1, 1),
                    offset_x: 128,
                    offset_y: 128
                },
            ]
        );
    }

    #[test]
    fn test_antimeridian_wraps_tile_x() {
        let viewport = Viewport::new(0.0, 179.9, 1, 256);
        let xs: Vec<u32> = viewport
            .tile_placements()
            .iter()
            .filter(|p| p.offset_y == -128)
            .map(|p| p.tile.x)
            .collect();

        assert_eq!(xs, vec![1, 0]);
        assert_eq!(viewport.marker_x, 128);
    }

    #[test]
    fn test_top_edge_clamps_origin() {
        let viewport = Viewport::new(85.0, 0.0, 1, 256);

        assert_eq!(viewport.origin_y, 0);
        assert!(viewport.marker_y < 128);
        assert!(viewport
            .tile_placements()
            .iter()
            .all(|p| p.tile.y == 0 && p.offset_y == 0));
    }

    #[test]
    fn test_bottom_edge_clamps_origin() {
        let viewport = Viewport::new(-85.0, 0.0, 2, 256);

        // World is 1024 px tall at zoom 2.
        assert_eq!(viewport.origin_y, 1024 - 256);
        assert!(viewport.marker_y > 128);
    }

    #[test]
    fn test_window_larger_than_world() {
        let viewport = Viewport::new(0.0, 0.0, 0, 512);

        assert_eq!(viewport.origin_y, 0);
        let placements = viewport.tile_placements();
        // Three columns (x -1, 0, 1 wrap to 0) by two rows (y 1 clamps to 0).
        assert_eq!(placements.len(), 6);
        assert!(placements
            .iter()
            .all(|p| p.tile == TileCoordinate::from_indices(0, 0, 0)));
    }

    #[test]
    fn test_tiles_cover_window_without_gaps() {
        for &(lat, lon, zoom, size) in &[
            (50.4501, 30.5234, 17u8, 512u32),
            (40.7128, -74.0060, 16, 300),
            (-33.8688, 151.2093, 12, 2048),
            (0.0, -179.99, 5, 128),
        ] {
            let viewport = Viewport::new(lat, lon, zoom, size);
            let placements = viewport.tile_placements();

            let min_x = placements.iter().map(|p| p.offset_x).min().unwrap();
            let min_y = placements.iter().map(|p| p.offset_y).min().unwrap();
            let max_x = placements.iter().map(|p| p.offset_x).max().unwrap();
            let max_y = placements.iter().map(|p| p.offset_y).max().unwrap();

            assert!(min_x <= 0 && min_y <= 0);
            assert!(max_x + 256 >= size as i64 && max_y + 256 >= size as i64);
            assert!(min_x > -256 && min_y > -256);
        }
    }

    #[test]
    fn test_marker_is_image_center_away_from_edges() {
        let viewport = Viewport::new(50.4501, 30.5234, 17, 512);
        assert_eq!((viewport.marker_x, viewport.marker_y), (256, 256));
    }
}
