//! Error types for projection configuration.

use geo_common::GeoError;
use thiserror::Error;

/// Result type alias using ProjectionError.
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Errors raised by projection setters and configuration loading.
///
/// Geometry is never rejected: degenerate input produces degenerate output
/// and singular coordinates come back as non-finite values.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid translate: {0}")]
    InvalidTranslate(String),

    #[error("Invalid precision: {0}")]
    InvalidPrecision(String),

    #[error("Invalid clip extent: {0}")]
    InvalidExtent(String),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("Unknown projector: {0}")]
    UnknownProjector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    /// Create an InvalidScale error.
    pub fn invalid_scale(msg: impl Into<String>) -> Self {
        Self::InvalidScale(msg.into())
    }

    /// Create an InvalidTranslate error.
    pub fn invalid_translate(msg: impl Into<String>) -> Self {
        Self::InvalidTranslate(msg.into())
    }

    /// Create an InvalidPrecision error.
    pub fn invalid_precision(msg: impl Into<String>) -> Self {
        Self::InvalidPrecision(msg.into())
    }
}

impl From<serde_yaml::Error> for ProjectionError {
    fn from(err: serde_yaml::Error) -> Self {
        ProjectionError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::Config(err.to_string())
    }
}
