//! Structured error types for the sitewise workspace.

use thiserror::Error;

/// Unified error type for all sitewise operations.
#[derive(Debug, Error)]
pub enum SitewiseError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vectors or matrices of inconsistent dimensions.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Out-of-range or malformed parameter (non-positive concentration,
    /// zero simulation size, bad configuration).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed or inconsistent input data from an external loader.
    #[error("input data error: {0}")]
    InputData(String),
}

/// Convenience alias used throughout the sitewise workspace.
pub type Result<T> = std::result::Result<T, SitewiseError>;
