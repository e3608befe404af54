//! Error types for router operations.

use thiserror::Error;

/// Errors that can occur while building or querying a router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// An argument was rejected at call time.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// The key did not resolve in any registered store.
    #[error("resource not found: {key}")]
    NotFound { key: String },

    /// The manifest text could not be decoded.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// I/O error while reading a manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for router operations.
pub type RouterResult<T> = std::result::Result<T, RouterError>;
