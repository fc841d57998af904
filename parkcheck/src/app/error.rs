//! Application error types.

use std::fmt;

use crate::geodata::GeodataError;
use crate::provider::ProviderError;

/// Errors that can occur while assembling the application.
#[derive(Debug)]
pub enum AppError {
    /// An HTTP client could not be created.
    HttpClient(ProviderError),

    /// The Overpass client rejected its configuration.
    Geodata(GeodataError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            AppError::Geodata(e) => write!(f, "Failed to create geodata client: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::HttpClient(e) => Some(e),
            AppError::Geodata(e) => Some(e),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::HttpClient(e)
    }
}

impl From<GeodataError> for AppError {
    fn from(e: GeodataError) -> Self {
        AppError::Geodata(e)
    }
}
