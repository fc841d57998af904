//! Coordinate conversion module
//!
//! Provides the spherical Web Mercator projection used by standard tile
//! servers, tile addressing helpers, and great-circle distances between
//! geographic points.

mod types;

pub use types::{
    tiles_per_axis, GeoPoint, PixelPoint, TileCoordinate, EARTH_RADIUS_METERS, MAX_LAT, MAX_LON,
    MAX_ZOOM, MIN_LAT, MIN_LON, TILE_SIZE,
};

use std::f64::consts::PI;

/// Clamps a latitude into the Web Mercator range (±85.05112878°).
#[inline]
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(MIN_LAT, MAX_LAT)
}

/// Normalizes a longitude into `[-180, 180]`.
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    let lon = lon % 360.0;
    if lon < MIN_LON {
        lon + 360.0
    } else if lon > MAX_LON {
        lon - 360.0
    } else {
        lon
    }
}

/// Edge length in pixels of the whole world raster at a zoom level.
#[inline]
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE as f64 * tiles_per_axis(zoom) as f64
}

/// Projects geographic coordinates into the world pixel raster.
///
/// Inputs are expected to be already clamped/normalized; see
/// [`clamp_latitude`] and [`normalize_longitude`].
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level
#[inline]
pub fn project(lat: f64, lon: f64, zoom: u8) -> PixelPoint {
    let size = world_size(zoom);

    let x = (lon + 180.0) / 360.0 * size;

    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * size;

    PixelPoint { x, y }
}

/// Great-circle (haversine) distance in meters between two points.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}
