//! Pipeline state machine.
//!
//! A pipeline is an ordered queue of heterogeneous CRUD requests batched for
//! sequential execution. The state machine has two states, `INACTIVE` and
//! `ACTIVE`; begin resets to active with an empty queue from either state,
//! and both execute and clear return the engine to inactive/empty.
//!
//! Queue bookkeeping is the only serialized section. The mutex is held for
//! the duration of a queue mutation and never across driver calls: execution
//! swaps the whole batch out under the lock and runs it lock-free, so
//! single-document operations on the same client stay fully concurrent.

use parking_lot::Mutex;

use crate::operation::OperationRequest;

/// Queue state owned by one pipeline instance.
struct PipelineState {
    active: bool,
    queue: Vec<OperationRequest>,
}

/// Client-side ordered batch of CRUD requests.
pub(crate) struct Pipeline {
    state: Mutex<PipelineState>,
}

impl Pipeline {
    /// Creates an inactive, empty pipeline.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PipelineState {
                active: false,
                queue: Vec::new(),
            }),
        }
    }

    /// Activates the pipeline with an empty queue.
    ///
    /// Calling this while already active is a deliberate reset: any queued
    /// but unexecuted requests are discarded, avoiding carry-over between
    /// logical batches.
    pub fn begin(&self) -> bool {
        let mut state = self.state.lock();
        state.active = true;
        state.queue.clear();
        true
    }

    /// Appends a request to the tail of the queue.
    ///
    /// Returns false (and discards the request) when the pipeline is
    /// inactive. Enqueue order across threads is lock-acquisition order.
    pub fn push(&self, request: OperationRequest) -> bool {
        let mut state = self.state.lock();
        if !state.active {
            return false;
        }
        state.queue.push(request);
        true
    }

    /// Drains the queue for execution, deactivating the pipeline.
    ///
    /// The returned batch preserves submission order.
    pub fn take_batch(&self) -> Vec<OperationRequest> {
        let mut state = self.state.lock();
        state.active = false;
        std::mem::take(&mut state.queue)
    }

    /// Discards the queue without executing and deactivates the pipeline.
    pub fn clear(&self) -> bool {
        let mut state = self.state.lock();
        state.active = false;
        state.queue.clear();
        true
    }

    /// Current queue length (0 when inactive).
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Whether the pipeline is accepting requests.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Pipeline")
            .field("active", &state.active)
            .field("queued", &state.queue.len())
            .finish()
    }
}
