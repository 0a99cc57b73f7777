//! Single-document operation execution.
//!
//! Every driver error is caught here and converted into a classified
//! [`OperationResult`]; nothing above this boundary handles driver error
//! types. Validation failures (`InvalidArgument`) are reported before any
//! driver call is made.

use std::sync::Arc;

use cove_driver::{Collection, DriverError};
use serde_json::Value;
use tracing::debug;

use crate::error::ErrorKind;
use crate::keyspace::Keyspace;
use crate::operation::{OperationKind, OperationRequest, OperationResult};
use crate::resolver::CollectionResolver;

/// Executes single-document verbs against resolved collection handles.
///
/// Borrowed from the live session state for the duration of one operation
/// or one pipeline batch.
pub(crate) struct OperationExecutor<'a> {
    resolver: &'a CollectionResolver,
}

impl<'a> OperationExecutor<'a> {
    /// Creates an executor over the given resolver.
    pub fn new(resolver: &'a CollectionResolver) -> Self {
        Self { resolver }
    }

    /// Dispatches a queued request to the matching verb.
    pub fn dispatch(&self, request: &OperationRequest) -> OperationResult {
        match request.kind {
            OperationKind::Get => self.get(&request.key, &request.target),
            OperationKind::Add => self.add(&request.key, &request.value, &request.target),
            OperationKind::Upsert => self.upsert(&request.key, &request.value, &request.target),
            OperationKind::Delete => self.remove(&request.key, &request.target),
        }
    }

    /// Reads the document under `key`.
    pub fn get(&self, key: &str, target: &Keyspace) -> OperationResult {
        if key.is_empty() {
            return empty_key();
        }
        let collection = match self.resolver.resolve(target) {
            Ok(collection) => collection,
            Err(err) => return classify(err),
        };
        match collection.get(key) {
            // Display is compact and keys keep insertion order, so compact
            // input round-trips byte for byte.
            Ok(value) => OperationResult::ok_with_value(value.to_string()),
            Err(err) => classify(err),
        }
    }

    /// Inserts a new document; fails if `key` already exists.
    pub fn add(&self, key: &str, value: &str, target: &Keyspace) -> OperationResult {
        let (collection, body) = match self.prepare_write(key, value, target) {
            Ok(prepared) => prepared,
            Err(result) => return result,
        };
        match collection.insert(key, &body) {
            Ok(()) => OperationResult::ok(),
            Err(err) => classify(err),
        }
    }

    /// Creates or replaces the document under `key`.
    pub fn upsert(&self, key: &str, value: &str, target: &Keyspace) -> OperationResult {
        let (collection, body) = match self.prepare_write(key, value, target) {
            Ok(prepared) => prepared,
            Err(result) => return result,
        };
        match collection.upsert(key, &body) {
            Ok(()) => OperationResult::ok(),
            Err(err) => classify(err),
        }
    }

    /// Deletes the document under `key`; fails if absent.
    pub fn remove(&self, key: &str, target: &Keyspace) -> OperationResult {
        if key.is_empty() {
            return empty_key();
        }
        let collection = match self.resolver.resolve(target) {
            Ok(collection) => collection,
            Err(err) => return classify(err),
        };
        match collection.remove(key) {
            Ok(()) => OperationResult::ok(),
            Err(err) => classify(err),
        }
    }

    /// Shared fail-fast validation and resolution for Add and Upsert.
    fn prepare_write(
        &self,
        key: &str,
        value: &str,
        target: &Keyspace,
    ) -> Result<(Arc<dyn Collection>, Value), OperationResult> {
        if key.is_empty() {
            return Err(empty_key());
        }
        let body: Value = match serde_json::from_str(value) {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "rejecting malformed document body");
                return Err(OperationResult::fail(
                    ErrorKind::InvalidArgument,
                    format!("value is not valid JSON: {err}"),
                ));
            }
        };
        let collection = self.resolver.resolve(target).map_err(classify)?;
        Ok((collection, body))
    }
}

fn empty_key() -> OperationResult {
    OperationResult::fail(ErrorKind::InvalidArgument, "key must not be empty")
}

/// Converts a driver error into a classified failure result.
fn classify(err: DriverError) -> OperationResult {
    OperationResult::fail(ErrorKind::from(&err), err.to_string())
}
