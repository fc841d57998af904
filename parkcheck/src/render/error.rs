use thiserror::Error;

/// Errors that can occur while rendering a map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A request parameter is outside the renderable range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// PNG encoding failed.
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The blocking compositing task panicked or was cancelled.
    #[error("Render worker failed: {0}")]
    Worker(String),
}

impl RenderError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RenderError::InvalidParameter(_))
    }
}
