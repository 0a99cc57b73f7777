//! Client connection management and the operation surface.
//!
//! A [`Client`] exclusively owns its session and collection cache, so
//! multiple independent clients can coexist in one process and tests can
//! substitute drivers.

use std::sync::Arc;

use cove_driver::{ConnectSpec, Driver, QueryContext, QueryOptions};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::executor::OperationExecutor;
use crate::keyspace::Keyspace;
use crate::operation::{OperationKind, OperationRequest, OperationResult};
use crate::pipeline::Pipeline;
use crate::resolver::CollectionResolver;
use crate::stats::ClientStats;

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Cluster connection string.
    pub connection_string: String,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
    /// Pre-resolve one default-keyspace handle per bucket at connect time
    /// (implicit single-bucket addressing mode).
    pub preresolve_buckets: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection_string: "cove://localhost".to_string(),
            username: String::new(),
            password: String::new(),
            preresolve_buckets: false,
        }
    }
}

impl ClientConfig {
    /// Creates a new client configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection string.
    pub fn connection_string(mut self, uri: impl Into<String>) -> Self {
        self.connection_string = uri.into();
        self
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Enables implicit bucket pre-resolution at connect time.
    pub fn preresolve_buckets(mut self, preresolve: bool) -> Self {
        self.preresolve_buckets = preresolve;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.connection_string.is_empty() {
            return Err(ClientError::InvalidConfig(
                "connection_string must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A CoveDB client.
///
/// Owns at most one live session at a time. All per-document verbs and the
/// pipeline surface require a successful [`connect`](Client::connect) first
/// and fail with [`ErrorKind::NotInitialized`] otherwise, without touching
/// the driver.
pub struct Client {
    /// Configuration.
    config: ClientConfig,
    /// Cluster transport.
    driver: Arc<dyn Driver>,
    /// Live session state: the resolver owns the session and its cache.
    session: RwLock<Option<CollectionResolver>>,
    /// Pipeline queue.
    pipeline: Pipeline,
    /// Usage counters.
    stats: Mutex<ClientStats>,
}

impl Client {
    /// Creates a disconnected client over the given driver.
    pub fn new(config: ClientConfig, driver: Arc<dyn Driver>) -> Self {
        Self {
            config,
            driver,
            session: RwLock::new(None),
            pipeline: Pipeline::new(),
            stats: Mutex::new(ClientStats::default()),
        }
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Establishes the session with the cluster.
    ///
    /// Reconnecting while already connected tears down the prior session
    /// first, then replaces it; the collection cache is rebuilt. A failed
    /// connect leaves no partial state and is safe to retry.
    pub fn connect(&self) -> ClientResult<()> {
        self.config.validate()?;

        let mut guard = self.session.write();
        if guard.take().is_some() {
            info!("replacing existing session");
        }

        let spec = ConnectSpec::new(
            &self.config.connection_string,
            &self.config.username,
            &self.config.password,
        );
        let session = self.driver.connect(&spec).map_err(|err| {
            error!(uri = %self.config.connection_string, error = %err, "failed to connect to cluster");
            ClientError::ConnectionFailed(err.to_string())
        })?;

        let resolver = CollectionResolver::new(session);
        if self.config.preresolve_buckets {
            resolver.preresolve_buckets().map_err(|err| {
                error!(error = %err, "bucket pre-resolution failed");
                ClientError::ConnectionFailed(err.to_string())
            })?;
        }

        *guard = Some(resolver);
        self.stats.lock().connects += 1;
        info!(uri = %self.config.connection_string, "connected to cluster");
        Ok(())
    }

    /// Releases the session. Idempotent; a no-op when not connected.
    pub fn close(&self) {
        if self.session.write().take().is_some() {
            info!("session closed");
        }
    }

    /// Returns true while a live session exists.
    pub fn is_connected(&self) -> bool {
        self.session.read().is_some()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a snapshot of the usage counters.
    pub fn stats(&self) -> ClientStats {
        self.stats.lock().clone()
    }

    // =========================================================================
    // Single-Document Operations
    // =========================================================================

    /// Reads the document under `key`.
    pub fn get(&self, key: &str, target: &Keyspace) -> OperationResult {
        let result = self.run(|executor| executor.get(key, target));
        self.record(OperationKind::Get, &result);
        result
    }

    /// Inserts a new document; fails with `AlreadyExists` if `key` is taken.
    pub fn add(&self, key: &str, value: &str, target: &Keyspace) -> OperationResult {
        let result = self.run(|executor| executor.add(key, value, target));
        self.record(OperationKind::Add, &result);
        result
    }

    /// Creates or replaces the document under `key`.
    pub fn upsert(&self, key: &str, value: &str, target: &Keyspace) -> OperationResult {
        let result = self.run(|executor| executor.upsert(key, value, target));
        self.record(OperationKind::Upsert, &result);
        result
    }

    /// Deletes the document under `key`; fails with `NotFound` if absent.
    pub fn remove(&self, key: &str, target: &Keyspace) -> OperationResult {
        let result = self.run(|executor| executor.remove(key, target));
        self.record(OperationKind::Delete, &result);
        result
    }

    // =========================================================================
    // Pipeline Surface
    // =========================================================================

    /// Activates the pipeline with an empty queue.
    ///
    /// While already active this is a deliberate reset discarding queued
    /// requests, not an error.
    pub fn begin_pipeline(&self) -> bool {
        self.pipeline.begin()
    }

    /// Queues an operation; returns false (request discarded) when the
    /// pipeline is inactive.
    ///
    /// Requests are not validated at enqueue time; validation failures are
    /// reported in the matching result slot at execution.
    pub fn pipeline_request(
        &self,
        kind: OperationKind,
        key: impl Into<String>,
        value: impl Into<String>,
        target: &Keyspace,
    ) -> bool {
        self.pipeline
            .push(OperationRequest::new(kind, key, value, target.clone()))
    }

    /// Executes the queued batch strictly in submission order.
    ///
    /// Returns exactly one result per request, at the request's index. An
    /// individual failure never aborts the batch; later requests observe the
    /// effects of earlier ones. The pipeline is left inactive and empty
    /// regardless of how many operations failed.
    pub fn execute_pipeline(&self) -> Vec<OperationResult> {
        let batch = self.pipeline.take_batch();
        if batch.is_empty() {
            return Vec::new();
        }

        let guard = self.session.read();
        let results: Vec<OperationResult> = match guard.as_ref() {
            Some(resolver) => {
                let executor = OperationExecutor::new(resolver);
                batch
                    .iter()
                    .map(|request| {
                        let result = executor.dispatch(request);
                        self.record(request.kind, &result);
                        result
                    })
                    .collect()
            }
            None => batch
                .iter()
                .map(|request| {
                    let result = not_initialized();
                    self.record(request.kind, &result);
                    result
                })
                .collect(),
        };

        self.stats.lock().pipelines_executed += 1;
        results
    }

    /// Discards the queue without executing any request.
    pub fn clear_pipeline(&self) -> bool {
        self.pipeline.clear()
    }

    /// Current pipeline queue length (0 when inactive).
    pub fn pipeline_size(&self) -> usize {
        self.pipeline.len()
    }

    /// Whether the pipeline is accepting requests.
    pub fn is_pipeline_active(&self) -> bool {
        self.pipeline.is_active()
    }

    // =========================================================================
    // Query Boundary
    // =========================================================================

    /// Executes a statement at cluster level.
    ///
    /// Options are forwarded verbatim to the query subsystem; rows come back
    /// as serialized JSON strings in server order.
    pub fn query(&self, statement: &str, options: &QueryOptions) -> ClientResult<Vec<String>> {
        self.run_query(statement, None, options)
    }

    /// Executes a statement at bucket/scope level.
    pub fn query_in_scope(
        &self,
        statement: &str,
        bucket: &str,
        scope: &str,
        options: &QueryOptions,
    ) -> ClientResult<Vec<String>> {
        let context = QueryContext::new(bucket, scope);
        self.run_query(statement, Some(&context), options)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Runs one operation against the live session, or reports
    /// `NotInitialized` without touching the driver.
    fn run<F>(&self, operation: F) -> OperationResult
    where
        F: FnOnce(&OperationExecutor<'_>) -> OperationResult,
    {
        let guard = self.session.read();
        match guard.as_ref() {
            Some(resolver) => operation(&OperationExecutor::new(resolver)),
            None => not_initialized(),
        }
    }

    fn run_query(
        &self,
        statement: &str,
        context: Option<&QueryContext>,
        options: &QueryOptions,
    ) -> ClientResult<Vec<String>> {
        let guard = self.session.read();
        let resolver = guard.as_ref().ok_or(ClientError::NotConnected)?;
        self.stats.lock().queries += 1;

        resolver
            .session()
            .query(statement, context, options)
            .map_err(|err| {
                error!(error = %err, "query execution failed");
                ClientError::QueryFailed(err.to_string())
            })
    }

    fn record(&self, kind: OperationKind, result: &OperationResult) {
        let mut stats = self.stats.lock();
        match kind {
            OperationKind::Get => stats.gets += 1,
            OperationKind::Add => stats.adds += 1,
            OperationKind::Upsert => stats.upserts += 1,
            OperationKind::Delete => stats.removes += 1,
        }
        if !result.success {
            stats.failed_operations += 1;
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("uri", &self.config.connection_string)
            .field("connected", &self.is_connected())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

fn not_initialized() -> OperationResult {
    OperationResult::fail(ErrorKind::NotInitialized, "client not connected")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cove_driver::MemoryDriver;

    fn test_client(driver: MemoryDriver) -> Client {
        let config = ClientConfig::new()
            .connection_string("cove://localhost")
            .username("admin")
            .password("password");
        Client::new(config, Arc::new(driver))
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .connection_string("cove://node1,node2")
            .username("app")
            .password("secret")
            .preresolve_buckets(true);

        assert_eq!(config.connection_string, "cove://node1,node2");
        assert_eq!(config.username, "app");
        assert!(config.preresolve_buckets);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_invalid() {
        let config = ClientConfig::new().connection_string("");
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_connect_and_close() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        assert!(!client.is_connected());

        client.connect().unwrap();
        assert!(client.is_connected());
        assert_eq!(client.stats().connects, 1);

        client.close();
        assert!(!client.is_connected());
        // Idempotent.
        client.close();
    }

    #[test]
    fn test_connect_auth_failure_leaves_no_state() {
        let config = ClientConfig::new()
            .connection_string("cove://localhost")
            .username("admin")
            .password("wrong");
        let client = Client::new(config, Arc::new(MemoryDriver::new()));

        assert!(matches!(
            client.connect(),
            Err(ClientError::ConnectionFailed(_))
        ));
        assert!(!client.is_connected());
        assert_eq!(client.stats().connects, 0);

        // Operations still refuse to run.
        let result = client.get("k", &Keyspace::bucket("b"));
        assert_eq!(result.error_kind, Some(ErrorKind::NotInitialized));
    }

    #[test]
    fn test_operations_before_connect() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        let ks = Keyspace::bucket("b");

        for result in [
            client.get("k", &ks),
            client.add("k", r#"{"a":1}"#, &ks),
            client.upsert("k", r#"{"a":1}"#, &ks),
            client.remove("k", &ks),
        ] {
            assert!(!result.success);
            assert_eq!(result.error_kind, Some(ErrorKind::NotInitialized));
        }
    }

    #[test]
    fn test_operations_after_close() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        client.connect().unwrap();
        client.close();

        let result = client.upsert("k", r#"{"a":1}"#, &Keyspace::bucket("b"));
        assert_eq!(result.error_kind, Some(ErrorKind::NotInitialized));
    }

    #[test]
    fn test_query_requires_session() {
        let client = test_client(MemoryDriver::new());
        let result = client.query("SELECT 1", &QueryOptions::new());
        assert!(matches!(result, Err(ClientError::NotConnected)));
    }

    #[test]
    fn test_query_failure_is_classified() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        client.connect().unwrap();

        // The memory driver has no query subsystem; the failure surfaces as
        // a classified client error, never a panic.
        let result = client.query("SELECT META().id FROM `b`", &QueryOptions::new());
        assert!(matches!(result, Err(ClientError::QueryFailed(_))));
        assert_eq!(client.stats().queries, 1);

        let result = client.query_in_scope(
            "SELECT * FROM _default",
            "b",
            "_default",
            &QueryOptions::new().client_context_id("ctx"),
        );
        assert!(matches!(result, Err(ClientError::QueryFailed(_))));
    }

    #[test]
    fn test_stats_counting() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        client.connect().unwrap();
        let ks = Keyspace::bucket("b");

        client.add("k", r#"{"a":1}"#, &ks);
        client.add("k", r#"{"a":1}"#, &ks); // AlreadyExists
        client.get("k", &ks);
        client.upsert("k", r#"{"a":2}"#, &ks);
        client.remove("k", &ks);

        let stats = client.stats();
        assert_eq!(stats.adds, 2);
        assert_eq!(stats.gets, 1);
        assert_eq!(stats.upserts, 1);
        assert_eq!(stats.removes, 1);
        assert_eq!(stats.failed_operations, 1);
        assert_eq!(stats.total_operations(), 5);
    }

    #[test]
    fn test_stats_count_refused_attempts() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        let ks = Keyspace::bucket("b");

        // Never connected: both attempts are refused locally but still count.
        client.get("k", &ks);
        client.begin_pipeline();
        client.pipeline_request(OperationKind::Add, "k", r#"{"a":1}"#, &ks);
        client.execute_pipeline();

        let stats = client.stats();
        assert_eq!(stats.gets, 1);
        assert_eq!(stats.adds, 1);
        assert_eq!(stats.failed_operations, 2);
    }

    #[test]
    fn test_reconnect_replaces_session() {
        let client = test_client(MemoryDriver::new().with_bucket("b"));
        client.connect().unwrap();
        client.add("k", r#"{"a":1}"#, &Keyspace::bucket("b"));

        client.connect().unwrap();
        assert_eq!(client.stats().connects, 2);

        // Documents live in the cluster, not the client; the fresh session
        // still sees them.
        let read = client.get("k", &Keyspace::bucket("b"));
        assert!(read.success);
    }
}
