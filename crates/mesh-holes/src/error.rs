//! Error types for hole-filling operations.

use thiserror::Error;

/// Result type alias for hole-filling operations.
pub type FillResult<T> = Result<T, FillError>;

/// Errors that can occur while filling holes.
#[derive(Debug, Error)]
pub enum FillError {
    /// Unknown fill method string.
    #[error("unsupported fill method {method:?} (expected \"area\" or \"angle\")")]
    UnsupportedMethod { method: String },

    /// The boundary loop cannot bound a hole in an edge-manifold mesh.
    #[error("invalid boundary loop: {details}")]
    InvalidLoop { details: String },
}
