//! In-memory driver.
//!
//! A deterministic substitute transport backed by process memory. The
//! "cluster" is a tree of buckets, scopes, and collections seeded at
//! construction time or created while running. Documents survive
//! reconnects, matching a real cluster, because all sessions share the
//! same cluster state.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::{DriverError, DriverResult};
use crate::query::{QueryContext, QueryOptions};
use crate::session::{Collection, ConnectSpec, Driver, Session};

/// Default scope/collection name, mirroring the store's implicit namespace.
pub const DEFAULT_NAME: &str = "_default";

/// Shared cluster state: buckets → scopes → collections.
struct ClusterState {
    buckets: RwLock<BTreeMap<String, BucketState>>,
}

#[derive(Default)]
struct BucketState {
    scopes: BTreeMap<String, ScopeState>,
}

#[derive(Default)]
struct ScopeState {
    collections: BTreeMap<String, Arc<MemoryCollection>>,
}

/// An in-memory cluster transport.
///
/// Seed buckets and collections with the builder methods, then hand the
/// driver to a client. Credentials default to `admin`/`password`.
pub struct MemoryDriver {
    cluster: Arc<ClusterState>,
    username: String,
    password: String,
    unreachable: AtomicBool,
}

impl MemoryDriver {
    /// Creates an empty in-memory cluster.
    pub fn new() -> Self {
        Self {
            cluster: Arc::new(ClusterState {
                buckets: RwLock::new(BTreeMap::new()),
            }),
            username: "admin".to_string(),
            password: "password".to_string(),
            unreachable: AtomicBool::new(false),
        }
    }

    /// Sets the credentials the cluster accepts.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Seeds a bucket with its default scope and collection.
    pub fn with_bucket(self, bucket: impl Into<String>) -> Self {
        self.create_bucket(bucket);
        self
    }

    /// Seeds a collection, creating the bucket and scope as needed.
    pub fn with_collection(
        self,
        bucket: impl Into<String>,
        scope: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        self.create_collection(bucket, scope, collection);
        self
    }

    /// Creates a bucket (with its default scope and collection) at runtime.
    pub fn create_bucket(&self, bucket: impl Into<String>) {
        self.create_collection(bucket, DEFAULT_NAME, DEFAULT_NAME);
    }

    /// Creates a collection at runtime, creating intermediate levels as needed.
    pub fn create_collection(
        &self,
        bucket: impl Into<String>,
        scope: impl Into<String>,
        collection: impl Into<String>,
    ) {
        let mut buckets = self.cluster.buckets.write();
        buckets
            .entry(bucket.into())
            .or_default()
            .scopes
            .entry(scope.into())
            .or_default()
            .collections
            .entry(collection.into())
            .or_insert_with(|| Arc::new(MemoryCollection::default()));
    }

    /// Simulates a network partition: subsequent connects fail.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for MemoryDriver {
    fn connect(&self, spec: &ConnectSpec) -> DriverResult<Arc<dyn Session>> {
        if !spec.connection_string.contains("://")
            || spec.connection_string.ends_with("://")
        {
            return Err(DriverError::InvalidConnectionString(
                spec.connection_string.clone(),
            ));
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(DriverError::Unreachable(spec.connection_string.clone()));
        }
        if spec.username != self.username || spec.password != self.password {
            return Err(DriverError::AuthenticationFailed(format!(
                "invalid credentials for user '{}'",
                spec.username
            )));
        }

        debug!(uri = %spec.connection_string, user = %spec.username, "memory driver session established");
        Ok(Arc::new(MemorySession {
            cluster: Arc::clone(&self.cluster),
        }))
    }
}

/// A session against the in-memory cluster.
struct MemorySession {
    cluster: Arc<ClusterState>,
}

impl Session for MemorySession {
    fn list_buckets(&self) -> DriverResult<Vec<String>> {
        Ok(self.cluster.buckets.read().keys().cloned().collect())
    }

    fn resolve(
        &self,
        bucket: &str,
        scope: &str,
        collection: &str,
    ) -> DriverResult<Arc<dyn Collection>> {
        let buckets = self.cluster.buckets.read();
        let bucket_state = buckets
            .get(bucket)
            .ok_or_else(|| DriverError::BucketNotFound(bucket.to_string()))?;
        let scope_state = bucket_state
            .scopes
            .get(scope)
            .ok_or_else(|| DriverError::ScopeNotFound(scope.to_string()))?;
        let handle = scope_state
            .collections
            .get(collection)
            .ok_or_else(|| DriverError::CollectionNotFound(collection.to_string()))?;
        Ok(Arc::clone(handle) as Arc<dyn Collection>)
    }

    fn query(
        &self,
        _statement: &str,
        _context: Option<&QueryContext>,
        _options: &QueryOptions,
    ) -> DriverResult<Vec<String>> {
        Err(DriverError::Unsupported("structured query"))
    }
}

/// A single in-memory collection of key → document pairs.
#[derive(Default)]
struct MemoryCollection {
    documents: RwLock<HashMap<String, Value>>,
}

impl Collection for MemoryCollection {
    fn get(&self, key: &str) -> DriverResult<Value> {
        self.documents
            .read()
            .get(key)
            .cloned()
            .ok_or(DriverError::DocumentNotFound)
    }

    fn insert(&self, key: &str, value: &Value) -> DriverResult<()> {
        let mut docs = self.documents.write();
        if docs.contains_key(key) {
            return Err(DriverError::DocumentExists);
        }
        docs.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn upsert(&self, key: &str, value: &Value) -> DriverResult<()> {
        self.documents.write().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> DriverResult<()> {
        match self.documents.write().remove(key) {
            Some(_) => Ok(()),
            None => Err(DriverError::DocumentNotFound),
        }
    }
}
