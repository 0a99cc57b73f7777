//! Transport traits and connection parameters.
//!
//! A driver exposes three object-safe traits. [`Driver`] establishes
//! authenticated sessions, a [`Session`] resolves keyspaces and runs queries,
//! and a [`Collection`] performs single-document primitives. The client layer
//! owns all validation and error classification; implementations only report
//! what the transport observed.

use std::sync::Arc;

use serde_json::Value;

use crate::error::DriverResult;
use crate::query::{QueryContext, QueryOptions};

/// Connection parameters handed verbatim to the driver.
#[derive(Debug, Clone)]
pub struct ConnectSpec {
    /// Cluster connection string (e.g. `cove://host1,host2`).
    pub connection_string: String,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl ConnectSpec {
    /// Creates connection parameters.
    pub fn new(
        connection_string: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A cluster transport capable of establishing sessions.
pub trait Driver: Send + Sync {
    /// Establishes an authenticated session with the cluster.
    ///
    /// Fails when the connection string is malformed, the cluster is
    /// unreachable, or the credentials are rejected.
    fn connect(&self, spec: &ConnectSpec) -> DriverResult<Arc<dyn Session>>;
}

/// A live, authenticated connection to the cluster.
///
/// Sessions are released by dropping the last reference; implementations
/// tear down transport state in `Drop`.
pub trait Session: Send + Sync {
    /// Lists the buckets visible to this session.
    fn list_buckets(&self) -> DriverResult<Vec<String>>;

    /// Resolves a (bucket, scope, collection) triple to a usable handle.
    fn resolve(
        &self,
        bucket: &str,
        scope: &str,
        collection: &str,
    ) -> DriverResult<Arc<dyn Collection>>;

    /// Executes a statement against the query subsystem.
    ///
    /// With a [`QueryContext`] the statement runs at bucket/scope level,
    /// otherwise at cluster level. Options are forwarded uninterpreted.
    /// Rows come back as serialized JSON strings in server order.
    fn query(
        &self,
        statement: &str,
        context: Option<&QueryContext>,
        options: &QueryOptions,
    ) -> DriverResult<Vec<String>>;
}

/// A resolved collection handle for single-document primitives.
pub trait Collection: Send + Sync {
    /// Reads the document stored under `key`.
    fn get(&self, key: &str) -> DriverResult<Value>;

    /// Stores a new document; fails if `key` already exists.
    fn insert(&self, key: &str, value: &Value) -> DriverResult<()>;

    /// Stores a document, replacing any existing one under `key`.
    fn upsert(&self, key: &str, value: &Value) -> DriverResult<()>;

    /// Deletes the document stored under `key`; fails if absent.
    fn remove(&self, key: &str) -> DriverResult<()>;
}
