//! # cove-driver
//!
//! Driver seam for the CoveDB client.
//!
//! This crate defines the boundary between the client access layer and the
//! underlying cluster transport. It includes:
//!
//! - **Traits**: [`Driver`], [`Session`], and [`Collection`] describe the
//!   primitives a transport must provide (connect, resolve, get, insert,
//!   upsert, remove, query)
//! - **Errors**: [`DriverError`] with one variant per transport failure mode
//! - **Query options**: [`QueryOptions`] carried through to the query
//!   subsystem without interpretation
//! - **Memory driver**: [`MemoryDriver`], a deterministic in-memory cluster
//!   used as a substitute transport in tests
//!
//! ## Example
//!
//! ```rust
//! use cove_driver::{ConnectSpec, Driver, MemoryDriver};
//!
//! let driver = MemoryDriver::new()
//!     .with_credentials("admin", "secret")
//!     .with_bucket("inventory");
//!
//! let spec = ConnectSpec::new("cove://localhost", "admin", "secret");
//! let session = driver.connect(&spec).unwrap();
//! assert_eq!(session.list_buckets().unwrap(), vec!["inventory"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types.
pub mod error;

/// In-memory driver for tests.
pub mod memory;

/// Query pass-through options.
pub mod query;

/// Transport traits and connection parameters.
pub mod session;

// Re-exports
pub use error::{DriverError, DriverResult};
pub use memory::MemoryDriver;
pub use query::{QueryContext, QueryOptions};
pub use session::{Collection, ConnectSpec, Driver, Session};
