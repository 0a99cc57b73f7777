//! Error types for the client library.

use std::fmt;

use cove_driver::DriverError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client error type for the `Result`-shaped surface (connect, close, query).
///
/// Per-document operations never return this type; they report failures
/// through classified [`OperationResult`](crate::OperationResult)s instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting to the cluster failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No live session; `connect` has not succeeded or `close` was called.
    #[error("client not connected")]
    NotConnected,

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Stable classification of per-operation failures.
///
/// Callers can always distinguish "the operation did not run due to a local
/// precondition" (`InvalidArgument`, `NotInitialized`) from "the operation
/// ran and the store rejected it" (`NotFound`, `AlreadyExists`) from "the
/// operation may or may not have run due to connectivity"
/// (`ConnectionError`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No live session when the operation was attempted.
    NotInitialized,
    /// Transport or authentication failure.
    ConnectionError,
    /// Bucket, scope, collection, or key absent.
    NotFound,
    /// Add on a pre-existing key.
    AlreadyExists,
    /// Empty key or malformed value, detected before any driver call.
    InvalidArgument,
    /// Uncategorized driver-level failure.
    Other,
}

impl ErrorKind {
    /// Returns true when the operation never reached the driver.
    pub fn is_local(self) -> bool {
        matches!(self, ErrorKind::NotInitialized | ErrorKind::InvalidArgument)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInitialized => write!(f, "not_initialized"),
            ErrorKind::ConnectionError => write!(f, "connection_error"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::AlreadyExists => write!(f, "already_exists"),
            ErrorKind::InvalidArgument => write!(f, "invalid_argument"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

impl From<&DriverError> for ErrorKind {
    fn from(err: &DriverError) -> Self {
        match err {
            DriverError::AuthenticationFailed(_)
            | DriverError::Unreachable(_)
            | DriverError::InvalidConnectionString(_)
            | DriverError::Io { .. } => ErrorKind::ConnectionError,
            DriverError::BucketNotFound(_)
            | DriverError::ScopeNotFound(_)
            | DriverError::CollectionNotFound(_)
            | DriverError::DocumentNotFound => ErrorKind::NotFound,
            DriverError::DocumentExists => ErrorKind::AlreadyExists,
            DriverError::Unsupported(_) | DriverError::Other(_) => ErrorKind::Other,
        }
    }
}
