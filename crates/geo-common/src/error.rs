//! Error types for geometry and extent handling.

use thiserror::Error;

/// Result type alias using GeoError.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised while building or parsing shared geometry types.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Invalid extent format: {0}. Expected 'x0,y0,x1,y1'")]
    InvalidExtentFormat(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid angle for '{param}': {message}")]
    InvalidAngle { param: String, message: String },

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeoError {
    /// Create an InvalidExtent error.
    pub fn invalid_extent(msg: impl Into<String>) -> Self {
        Self::InvalidExtent(msg.into())
    }

    /// Create an InvalidAngle error.
    pub fn invalid_angle(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAngle {
            param: param.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(err: serde_json::Error) -> Self {
        GeoError::InvalidGeoJson(err.to_string())
    }
}
