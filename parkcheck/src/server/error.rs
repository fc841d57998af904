//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::analysis::AnalysisError;
use crate::render::RenderError;

/// Every failure an API handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters. Answered as plain text.
    #[error("{0}")]
    BadRequest(String),

    /// The geodata source failed or returned garbage.
    #[error("Geodata upstream failure: {0}")]
    Upstream(String),

    /// The request did not finish before its deadline.
    #[error("Request timed out")]
    Timeout,

    /// Rendering or another internal step failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::InvalidCoordinates { .. } => ApiError::BadRequest(e.to_string()),
            AnalysisError::Geodata(inner) => ApiError::Upstream(inner.to_string()),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(message) => {
                warn!(status = status.as_u16(), error = %message, "Rejected request");
                (status, message.clone()).into_response()
            }
            _ => {
                error!(status = status.as_u16(), error = %self, "Request failed");
                let body = ErrorBody {
                    error: self.to_string(),
                    status: status.as_u16(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::GeodataError;
    use crate::provider::ProviderError;

    #[test]
    fn test_status_mapping() {
        let upstream: ApiError = AnalysisError::Geodata(GeodataError::UpstreamUnavailable(
            ProviderError::HttpStatus {
                status: 504,
                url: "https://overpass.example".to_string(),
            },
        ))
        .into();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let invalid: ApiError = RenderError::InvalidParameter("zoom".to_string()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let worker: ApiError = RenderError::Worker("panicked".to_string()).into();
        assert_eq!(worker.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_bad_coordinates_are_client_errors() {
        let err: ApiError = AnalysisError::InvalidCoordinates {
            lat: 100.0,
            lon: 0.0,
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
