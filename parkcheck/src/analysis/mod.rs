//! Analysis façade.
//!
//! [`ParkingAnalysisService`] runs a location through the geodata client and
//! the rule engine. [`MapService`] validates map requests before handing them
//! to the renderer.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::coord::{GeoPoint, MAX_ZOOM};
use crate::geodata::{GeodataError, GeodataSource};
use crate::render::{MapRenderer, RenderError, RenderedMap};
use crate::rules::{evaluate, AnalysisResult};

/// Smallest accepted map size in pixels.
pub const MIN_IMAGE_SIZE: i64 = 128;

/// Largest accepted map size in pixels.
pub const MAX_IMAGE_SIZE: i64 = 2048;

/// Errors from a parking check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error(transparent)]
    Geodata(#[from] GeodataError),
}

/// Geodata client followed by the rule engine.
#[derive(Clone)]
pub struct ParkingAnalysisService {
    geodata: Arc<dyn GeodataSource>,
}

impl ParkingAnalysisService {
    pub fn new(geodata: Arc<dyn GeodataSource>) -> Self {
        Self { geodata }
    }

    /// Checks whether stopping at `(lat, lon)` breaks a proximity rule.
    pub async fn analyze(&self, lat: f64, lon: f64) -> Result<AnalysisResult, AnalysisError> {
        let point = GeoPoint::new(lat, lon);
        if !point.is_valid() {
            return Err(AnalysisError::InvalidCoordinates { lat, lon });
        }

        info!(point = %point, "Analyzing parking location");
        let features = self.geodata.fetch_nearby_features(point).await?;
        info!(point = %point, features = features.len(), "Found nearby features");

        let result = evaluate(features);
        info!(
            point = %point,
            violation = result.is_violation,
            reasons = result.reasons.len(),
            "Analysis complete"
        );
        Ok(result)
    }
}

/// Range-checked front of the map renderer.
#[derive(Clone)]
pub struct MapService {
    renderer: MapRenderer,
}

impl MapService {
    pub fn new(renderer: MapRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    /// Renders a map after checking `zoom ∈ [0, 19]` and
    /// `image_size ∈ [128, 2048]`.
    ///
    /// Out-of-range values fail with `InvalidParameter` without touching the
    /// renderer.
    pub async fn render(
        &self,
        lat: f64,
        lon: f64,
        zoom: i64,
        image_size: i64,
    ) -> Result<RenderedMap, RenderError> {
        let zoom = u8::try_from(zoom)
            .ok()
            .filter(|z| *z <= MAX_ZOOM)
            .ok_or_else(|| {
                RenderError::InvalidParameter(format!(
                    "zoom must be between 0 and {}, got {}",
                    MAX_ZOOM, zoom
                ))
            })?;

        if !(MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE).contains(&image_size) {
            return Err(RenderError::InvalidParameter(format!(
                "imageSize must be between {} and {}, got {}",
                MIN_IMAGE_SIZE, MAX_IMAGE_SIZE, image_size
            )));
        }

        if !lat.is_finite() || !lon.is_finite() {
            return Err(RenderError::InvalidParameter(
                "coordinates must be finite".to_string(),
            ));
        }

        info!(lat, lon, zoom, image_size, "Rendering map");
        self.renderer
            .render(lat, lon, zoom, image_size as u32)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::BoxFuture;
    use crate::coord::TileCoordinate;
    use crate::geodata::{FeatureKind, NearbyFeature};
    use crate::provider::{ProviderError, TileSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticGeodata(Result<Vec<NearbyFeature>, GeodataError>);

    impl GeodataSource for StaticGeodata {
        fn fetch_nearby_features(
            &self,
            _point: GeoPoint,
        ) -> BoxFuture<'_, Result<Vec<NearbyFeature>, GeodataError>> {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    /// Tile source that records calls and always fails.
    #[derive(Default)]
    struct RecordingSource {
        calls: AtomicUsize,
    }

    impl TileSource for RecordingSource {
        fn fetch_tile(
            &self,
            tile: TileCoordinate,
        ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Err(ProviderError::HttpError(format!("offline: {}", tile))) })
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn map_service() -> (Arc<RecordingSource>, MapService) {
        let source = Arc::new(RecordingSource::default());
        let service = MapService::new(MapRenderer::new(source.clone()));
        (source, service)
    }

    #[tokio::test]
    async fn test_analyze_crossing_violation() {
        let service = ParkingAnalysisService::new(Arc::new(StaticGeodata(Ok(vec![
            NearbyFeature::new(FeatureKind::Crossing, 8.0, 1),
        ]))));

        let result = service.analyze(50.4501, 30.5234).await.unwrap();
        assert!(result.is_violation);
        assert_eq!(result.reasons[0].code, "15.9(г)");
    }

    #[tokio::test]
    async fn test_analyze_propagates_geodata_error() {
        let service = ParkingAnalysisService::new(Arc::new(StaticGeodata(Err(
            GeodataError::MalformedResponse("eof".to_string()),
        ))));

        let result = service.analyze(50.4501, 30.5234).await;
        assert!(matches!(
            result,
            Err(AnalysisError::Geodata(GeodataError::MalformedResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_coordinates() {
        let service = ParkingAnalysisService::new(Arc::new(StaticGeodata(Ok(Vec::new()))));

        for (lat, lon) in [(91.0, 0.0), (0.0, -180.5), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
            let result = service.analyze(lat, lon).await;
            assert!(
                matches!(result, Err(AnalysisError::InvalidCoordinates { .. })),
                "({lat}, {lon})"
            );
        }
    }

    #[tokio::test]
    async fn test_zoom_out_of_range_never_reaches_renderer() {
        let (source, service) = map_service();

        for zoom in [25, 20, -1, 300] {
            let result = service.render(50.45, 30.52, zoom, 512).await;
            assert!(matches!(result, Err(RenderError::InvalidParameter(_))));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_image_size_out_of_range_never_reaches_renderer() {
        let (source, service) = map_service();

        for size in [0, 127, 2049, -512] {
            let result = service.render(50.45, 30.52, 17, size).await;
            assert!(matches!(result, Err(RenderError::InvalidParameter(_))));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_request_reaches_renderer() {
        let (source, service) = map_service();

        let map = service.render(50.45, 30.52, 0, 128).await.unwrap();
        assert!(!map.data.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
