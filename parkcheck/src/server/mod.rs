//! HTTP surface.
//!
//! | Route | Response |
//! |---|---|
//! | `GET /api/check?lat&lon` | JSON verdict |
//! | `GET /api/map?lat&lon&zoom&imageSize` | PNG map |
//! | `GET /health` | `OK` |

mod error;
mod handlers;

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::{MapService, ParkingAnalysisService};

pub use error::ApiError;
pub use handlers::{CheckParams, MapParams, DEFAULT_IMAGE_SIZE, DEFAULT_ZOOM};

/// Default per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analysis: ParkingAnalysisService,
    pub maps: MapService,
    /// Deadline applied to each check and map request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(analysis: ParkingAnalysisService, maps: MapService) -> Self {
        Self {
            analysis,
            maps,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/check", get(handlers::check))
        .route("/api/map", get(handlers::map))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish after cancellation.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "HTTP server listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("Shutdown requested, draining connections");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::BoxFuture;
    use crate::coord::{GeoPoint, TileCoordinate};
    use crate::geodata::{FeatureKind, GeodataError, GeodataSource, NearbyFeature};
    use crate::provider::{ProviderError, TileSource};
    use crate::render::MapRenderer;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Arc;
    use tower::ServiceExt;

    enum Geodata {
        Features(Vec<NearbyFeature>),
        Failing,
        Hanging,
    }

    impl GeodataSource for Geodata {
        fn fetch_nearby_features(
            &self,
            _point: GeoPoint,
        ) -> BoxFuture<'_, Result<Vec<NearbyFeature>, GeodataError>> {
            Box::pin(async move {
                match self {
                    Geodata::Features(features) => Ok(features.clone()),
                    Geodata::Failing => Err(GeodataError::UpstreamUnavailable(
                        ProviderError::HttpStatus {
                            status: 503,
                            url: "https://overpass.example/api/interpreter".to_string(),
                        },
                    )),
                    Geodata::Hanging => futures::future::pending().await,
                }
            })
        }
    }

    struct SolidTiles;

    impl TileSource for SolidTiles {
        fn fetch_tile(
            &self,
            _tile: TileCoordinate,
        ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
            Box::pin(async {
                let tile = RgbaImage::from_pixel(256, 256, Rgba([0, 128, 0, 255]));
                let mut data = Vec::new();
                DynamicImage::ImageRgba8(tile)
                    .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
                    .map_err(|e| ProviderError::HttpError(e.to_string()))?;
                Ok::<_, ProviderError>(data)
            })
        }

        fn name(&self) -> &str {
            "solid"
        }
    }

    struct HangingTiles;

    impl TileSource for HangingTiles {
        fn fetch_tile(
            &self,
            _tile: TileCoordinate,
        ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
            Box::pin(futures::future::pending::<Result<Vec<u8>, ProviderError>>())
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    fn app(geodata: Geodata) -> Router {
        app_with_timeout(geodata, Duration::from_secs(30))
    }

    fn app_with_timeout(geodata: Geodata, timeout: Duration) -> Router {
        let state = AppState::new(
            ParkingAnalysisService::new(Arc::new(geodata)),
            MapService::new(MapRenderer::new(Arc::new(SolidTiles))),
        )
        .with_request_timeout(timeout);
        router(state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get(app(Geodata::Features(Vec::new())), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_check_returns_verdict_json() {
        let geodata = Geodata::Features(vec![NearbyFeature::new(FeatureKind::Crossing, 8.0, 42)]);
        let (status, headers, body) =
            get(app(geodata), "/api/check?lat=50.4501&lon=30.5234").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/json"));

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["isViolation"], true);
        assert_eq!(json["reasons"][0]["code"], "15.9(г)");
        assert!(json["reasons"][0]["description"]
            .as_str()
            .unwrap()
            .contains("8.0 м"));
        assert_eq!(json["nearbyObjects"][0]["osmId"], 42);
    }

    #[tokio::test]
    async fn test_check_empty_area() {
        let (status, _, body) = get(
            app(Geodata::Features(Vec::new())),
            "/api/check?lat=50.4501&lon=30.5234",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["isViolation"], false);
        assert_eq!(json["reasons"], serde_json::json!([]));
        assert_eq!(json["nearbyObjects"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_check_upstream_failure_is_bad_gateway() {
        let (status, _, body) = get(app(Geodata::Failing), "/api/check?lat=50.45&lon=30.52").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 502);
        assert!(json["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_check_rejects_bad_coordinates() {
        let app = app(Geodata::Features(Vec::new()));

        let (status, _, _) = get(app.clone(), "/api/check?lat=95&lon=30.52").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = get(app.clone(), "/api/check?lat=NaN&lon=30.52").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = get(app, "/api/check?lat=abc&lon=30.52").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_deadline_is_gateway_timeout() {
        let (status, _, body) = get(
            app_with_timeout(Geodata::Hanging, Duration::from_millis(100)),
            "/api/check?lat=50.45&lon=30.52",
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 504);
    }

    #[tokio::test]
    async fn test_map_deadline_is_gateway_timeout() {
        let state = AppState::new(
            ParkingAnalysisService::new(Arc::new(Geodata::Features(Vec::new()))),
            MapService::new(MapRenderer::new(Arc::new(HangingTiles))),
        )
        .with_request_timeout(Duration::from_millis(100));

        let (status, _, body) = get(router(state), "/api/map?lat=50.45&lon=30.52").await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 504);
    }

    #[tokio::test]
    async fn test_map_returns_png_with_defaults() {
        let (status, headers, body) = get(
            app(Geodata::Features(Vec::new())),
            "/api/map?lat=50.4501&lon=30.5234",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"map_z17_50.4501_30.5234.png\""
        );

        let image = image::load_from_memory(&body).unwrap();
        assert_eq!((image.width(), image.height()), (512, 512));
    }

    #[tokio::test]
    async fn test_map_rejects_zoom_25_as_plain_text() {
        let (status, headers, body) = get(
            app(Geodata::Features(Vec::new())),
            "/api/map?lat=50.45&lon=30.52&zoom=25&imageSize=512",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert!(String::from_utf8(body).unwrap().contains("zoom"));
    }

    #[tokio::test]
    async fn test_map_rejects_image_size() {
        let (status, _, _) = get(
            app(Geodata::Features(Vec::new())),
            "/api/map?lat=50.45&lon=30.52&imageSize=4096",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
