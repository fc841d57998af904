//! Map rendering service.
//!
//! Produces a square PNG centered on a coordinate by stitching 256×256 XYZ
//! tiles from a [`TileSource`](crate::provider::TileSource), consulting the
//! tile store first, and drawing a marker at the requested point.

mod error;
mod marker;
mod renderer;
mod viewport;

pub use error::RenderError;
pub use marker::{draw_marker, marker_radius, MARKER_FILL, MARKER_OUTLINE};
pub use renderer::{map_file_name, MapRenderer, RenderedMap, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use viewport::{TilePlacement, Viewport};
