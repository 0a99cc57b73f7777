//! Keyspace resolution with a per-session handle cache.

use std::sync::Arc;

use cove_driver::{Collection, DriverResult, Session};
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::keyspace::{Keyspace, DEFAULT_NAME};

/// Resolves logical keyspaces to collection handles.
///
/// Handles are cached per distinct (bucket, scope, collection) key for O(1)
/// lookup. The resolver is owned by the session state, so reconnecting
/// discards the cache together with the session it was built against.
/// Not-found outcomes are never cached, so a resolution can succeed later
/// once the target is created.
pub(crate) struct CollectionResolver {
    session: Arc<dyn Session>,
    cache: DashMap<Keyspace, Arc<dyn Collection>>,
}

impl CollectionResolver {
    /// Creates a resolver with an empty cache.
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            cache: DashMap::new(),
        }
    }

    /// Pre-populates one default-keyspace handle per bucket visible to the
    /// session (implicit single-bucket addressing mode).
    pub fn preresolve_buckets(&self) -> DriverResult<usize> {
        let buckets = self.session.list_buckets()?;
        let mut resolved = 0;
        for bucket in buckets {
            let keyspace = Keyspace::bucket(&bucket);
            match self.session.resolve(&bucket, DEFAULT_NAME, DEFAULT_NAME) {
                Ok(handle) => {
                    self.cache.insert(keyspace, handle);
                    resolved += 1;
                }
                Err(err) => {
                    warn!(bucket = %bucket, error = %err, "skipping bucket during pre-resolution");
                }
            }
        }
        debug!(resolved, "pre-resolved bucket handles");
        Ok(resolved)
    }

    /// Resolves a keyspace, consulting the cache first.
    pub fn resolve(&self, keyspace: &Keyspace) -> DriverResult<Arc<dyn Collection>> {
        if let Some(handle) = self.cache.get(keyspace) {
            return Ok(Arc::clone(handle.value()));
        }

        let handle = self
            .session
            .resolve(&keyspace.bucket, &keyspace.scope, &keyspace.collection)?;
        debug!(keyspace = %keyspace, "resolved collection handle");
        self.cache
            .insert(keyspace.clone(), Arc::clone(&handle));
        Ok(handle)
    }

    /// The owning session.
    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Number of cached handles.
    #[cfg(test)]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for CollectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionResolver")
            .field("cached", &self.cache.len())
            .finish()
    }
}
