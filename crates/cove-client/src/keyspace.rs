//! Logical document addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default scope and collection name.
pub const DEFAULT_NAME: &str = "_default";

/// A logical (bucket, scope, collection) address.
///
/// One descriptor replaces the with/without-scope call variants: `scope` and
/// `collection` default to `_default` and are overridden per address.
///
/// # Example
///
/// ```rust
/// use cove_client::Keyspace;
///
/// let implicit = Keyspace::bucket("inventory");
/// assert_eq!(implicit.scope, "_default");
///
/// let explicit = Keyspace::bucket("inventory").scope("eu").collection("orders");
/// assert_eq!(explicit.to_string(), "inventory.eu.orders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyspace {
    /// Top-level namespace.
    pub bucket: String,
    /// Scope within the bucket.
    pub scope: String,
    /// Collection within the scope.
    pub collection: String,
}

impl Keyspace {
    /// Addresses the default collection of the default scope of `bucket`.
    pub fn bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            scope: DEFAULT_NAME.to_string(),
            collection: DEFAULT_NAME.to_string(),
        }
    }

    /// Overrides the scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Overrides the collection.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

impl fmt::Display for Keyspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.bucket, self.scope, self.collection)
    }
}
