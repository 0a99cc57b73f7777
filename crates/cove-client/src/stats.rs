//! Client usage counters.

use serde::{Deserialize, Serialize};

/// Statistics about client usage.
///
/// Counters cover both single-call and pipelined operations; a pipelined
/// Get increments `gets` exactly like a direct one. Per-verb counters count
/// attempts, including those refused locally before any driver call (no
/// live session, invalid arguments); every failure result also increments
/// `failed_operations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientStats {
    /// Successful connects (including reconnects).
    pub connects: u64,
    /// Get operations executed.
    pub gets: u64,
    /// Add operations executed.
    pub adds: u64,
    /// Upsert operations executed.
    pub upserts: u64,
    /// Remove operations executed.
    pub removes: u64,
    /// Operations that produced a failure result.
    pub failed_operations: u64,
    /// Pipeline batches executed.
    pub pipelines_executed: u64,
    /// Query statements submitted.
    pub queries: u64,
}

impl ClientStats {
    /// Total operations executed across all verbs.
    pub fn total_operations(&self) -> u64 {
        self.gets + self.adds + self.upserts + self.removes
    }
}
