//! # cove-client
//!
//! Client access layer for CoveDB, a clustered document database.
//!
//! This crate manages the session to the cluster, resolves named storage
//! targets, executes single-document CRUD verbs, and batches heterogeneous
//! operations into ordered pipelines. It includes:
//!
//! - **Connection Management**: one exclusively-owned session per [`Client`],
//!   with idempotent close and replace-on-reconnect
//! - **Keyspace Resolution**: cached (bucket, scope, collection) handles,
//!   implicit and explicit addressing modes
//! - **Document Operations**: Get/Add/Upsert/Remove with fail-fast validation
//!   and classified results; no driver error ever reaches the caller raw
//! - **Pipelines**: ordered batches with one result per request and no
//!   cross-request atomicity
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cove_client::{Client, ClientConfig, Keyspace, OperationKind};
//! use cove_driver::MemoryDriver;
//!
//! let driver = Arc::new(MemoryDriver::new().with_bucket("inventory"));
//! let config = ClientConfig::new()
//!     .connection_string("cove://localhost")
//!     .username("admin")
//!     .password("password");
//!
//! let client = Client::new(config, driver);
//! client.connect().unwrap();
//!
//! let items = Keyspace::bucket("inventory");
//! client.add("item::1", r#"{"name":"widget"}"#, &items);
//!
//! client.begin_pipeline();
//! client.pipeline_request(OperationKind::Upsert, "item::2", r#"{"name":"gadget"}"#, &items);
//! client.pipeline_request(OperationKind::Get, "item::1", "", &items);
//! let results = client.execute_pipeline();
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[1].value_or_empty(), r#"{"name":"widget"}"#);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Client connection and operation surface.
pub mod client;

/// Error types and failure classification.
pub mod error;

/// Operation execution against resolved handles.
mod executor;

/// Logical document addresses.
pub mod keyspace;

/// Operation requests and results.
pub mod operation;

/// Pipeline state machine.
mod pipeline;

/// Keyspace resolution cache.
mod resolver;

/// Usage counters.
pub mod stats;

// Re-exports
pub use client::{Client, ClientConfig};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use keyspace::{Keyspace, DEFAULT_NAME};
pub use operation::{OperationKind, OperationRequest, OperationResult};
pub use stats::ClientStats;
