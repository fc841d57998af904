//! HTTP handlers for `/api/check`, `/api/map` and `/health`.

use std::future::Future;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::rules::AnalysisResult;

/// Zoom used when `/api/map` is called without one.
pub const DEFAULT_ZOOM: i64 = 17;

/// Image size used when `/api/map` is called without one.
pub const DEFAULT_IMAGE_SIZE: i64 = 512;

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_zoom")]
    pub zoom: i64,
    #[serde(default = "default_image_size")]
    pub image_size: i64,
}

fn default_zoom() -> i64 {
    DEFAULT_ZOOM
}

fn default_image_size() -> i64 {
    DEFAULT_IMAGE_SIZE
}

/// Runs `fut` under the request deadline.
async fn with_deadline<T, E>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, ApiError>
where
    ApiError: From<E>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => Err(ApiError::Timeout),
    }
}

pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!(lat = params.lat, lon = params.lon, "Checking parking");
    let result = with_deadline(
        state.request_timeout,
        state.analysis.analyze(params.lat, params.lon),
    )
    .await?;
    Ok(Json(result))
}

pub async fn map(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> Result<Response, ApiError> {
    let rendered = with_deadline(
        state.request_timeout,
        state
            .maps
            .render(params.lat, params.lon, params.zoom, params.image_size),
    )
    .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", rendered.file_name),
            ),
        ],
        rendered.data,
    )
        .into_response())
}

pub async fn health() -> &'static str {
    "OK"
}
