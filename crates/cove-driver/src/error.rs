//! Error types for the driver boundary.

use thiserror::Error;

/// Error type surfaced by a driver implementation.
///
/// Every transport failure mode has its own variant so the client can
/// classify failures without inspecting message text.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The cluster rejected the supplied credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The cluster could not be reached.
    #[error("cluster unreachable: {0}")]
    Unreachable(String),

    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The named bucket does not exist.
    #[error("bucket '{0}' not found")]
    BucketNotFound(String),

    /// The named scope does not exist within its bucket.
    #[error("scope '{0}' not found")]
    ScopeNotFound(String),

    /// The named collection does not exist within its scope.
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// No document exists under the requested key.
    #[error("document not found")]
    DocumentNotFound,

    /// A document already exists under the requested key.
    #[error("document already exists")]
    DocumentExists,

    /// The driver does not implement the requested primitive.
    #[error("operation not supported by this driver: {0}")]
    Unsupported(&'static str),

    /// I/O error from the underlying transport.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Uncategorized driver-level failure.
    #[error("driver error: {0}")]
    Other(String),
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
