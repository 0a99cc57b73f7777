//! Operation requests and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::keyspace::Keyspace;

/// The four single-document verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Insert only; fails if the key already exists.
    Add,
    /// Unconditional create-or-replace.
    Upsert,
    /// Read the document under a key.
    Get,
    /// Delete an existing document.
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Add => write!(f, "add"),
            OperationKind::Upsert => write!(f, "upsert"),
            OperationKind::Get => write!(f, "get"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// A queued operation, immutable once enqueued.
///
/// Each request carries its own target so one batch may span multiple
/// collections and buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// The verb to execute.
    pub kind: OperationKind,
    /// Document key.
    pub key: String,
    /// Document body as JSON text; ignored for Get and Delete.
    pub value: String,
    /// Target keyspace.
    pub target: Keyspace,
}

impl OperationRequest {
    /// Creates a request.
    pub fn new(
        kind: OperationKind,
        key: impl Into<String>,
        value: impl Into<String>,
        target: Keyspace,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            value: value.into(),
            target,
        }
    }
}

/// The outcome of one operation, in both single-call and pipelined modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Retrieved document body; present only for a successful Get.
    pub value: Option<String>,
    /// Failure classification; absent on success.
    pub error_kind: Option<ErrorKind>,
    /// Human-readable failure detail; absent on success.
    pub error_message: Option<String>,
}

impl OperationResult {
    /// A successful mutation (no value to return).
    pub fn ok() -> Self {
        Self {
            success: true,
            value: None,
            error_kind: None,
            error_message: None,
        }
    }

    /// A successful read carrying the document body.
    pub fn ok_with_value(value: impl Into<String>) -> Self {
        Self {
            success: true,
            value: Some(value.into()),
            error_kind: None,
            error_message: None,
        }
    }

    /// A classified failure.
    pub fn fail(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error_kind: Some(kind),
            error_message: Some(message.into()),
        }
    }

    /// The retrieved value, or `""` when none is present.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let ok = OperationResult::ok();
        assert!(ok.success);
        assert_eq!(ok.value_or_empty(), "");
        assert!(ok.error_kind.is_none());

        let read = OperationResult::ok_with_value(r#"{"a":1}"#);
        assert!(read.success);
        assert_eq!(read.value_or_empty(), r#"{"a":1}"#);

        let fail = OperationResult::fail(ErrorKind::NotFound, "document not found");
        assert!(!fail.success);
        assert_eq!(fail.value_or_empty(), "");
        assert_eq!(fail.error_kind, Some(ErrorKind::NotFound));
        assert_eq!(fail.error_message.as_deref(), Some("document not found"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(OperationKind::Add.to_string(), "add");
        assert_eq!(OperationKind::Delete.to_string(), "delete");
    }

    #[test]
    fn test_request_carries_target() {
        let req = OperationRequest::new(
            OperationKind::Upsert,
            "k",
            r#"{"a":1}"#,
            Keyspace::bucket("b").collection("c"),
        );
        assert_eq!(req.target.collection, "c");
        assert_eq!(req.kind, OperationKind::Upsert);
    }
}
