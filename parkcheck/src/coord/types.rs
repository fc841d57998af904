//! Coordinate types and constants.

use std::fmt;

/// Edge length of a raster tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Maximum latitude representable in Web Mercator.
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum latitude representable in Web Mercator.
pub const MIN_LAT: f64 = -MAX_LAT;

/// Minimum longitude.
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude.
pub const MAX_LON: f64 = 180.0;

/// Highest zoom level served by standard tile servers.
pub const MAX_ZOOM: u8 = 19;

/// Mean Earth radius in meters, used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both components are finite and inside the
    /// geographic range (lat ±90, lon ±180).
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (MIN_LON..=MAX_LON).contains(&self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Address of a 256×256 tile in the standard XYZ tile pyramid.
///
/// Always normalized: `x` and `y` are inside `[0, 2^zoom)`. Use
/// [`TileCoordinate::from_indices`] to build one from unbounded indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoordinate {
    /// Builds a tile address from signed tile indices.
    ///
    /// X wraps around the antimeridian (modulo `2^zoom`). Y is clamped into
    /// `[0, 2^zoom - 1]` because the pyramid has no vertical wraparound.
    pub fn from_indices(zoom: u8, x: i64, y: i64) -> Self {
        let n = tiles_per_axis(zoom) as i64;
        Self {
            zoom,
            x: x.rem_euclid(n) as u32,
            y: y.clamp(0, n - 1) as u32,
        }
    }

    /// Key used by the tile store: `{zoom}_{x}_{y}`.
    pub fn cache_key(&self) -> String {
        format!("{}_{}_{}", self.zoom, self.x, self.y)
    }
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Number of tiles along one axis at the given zoom level.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u64 {
    1u64 << zoom
}

/// A position in the world pixel raster at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}
