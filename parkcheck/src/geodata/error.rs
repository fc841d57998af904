use thiserror::Error;

use crate::provider::ProviderError;

/// Errors from the geodata client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodataError {
    /// The Overpass endpoint could not be reached or answered with a
    /// non-success status.
    #[error("Geodata source unavailable: {0}")]
    UpstreamUnavailable(#[from] ProviderError),

    /// The payload could not be parsed as an Overpass JSON response.
    #[error("Malformed geodata response: {0}")]
    MalformedResponse(String),

    /// The configured endpoint is not a valid absolute URL.
    #[error("Invalid geodata endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
