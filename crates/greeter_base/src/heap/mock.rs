use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{GreeterError, GreeterResult};

use super::system::SystemHeap;
use super::traits::Heap;

/* 📖 # Why does MockHeap still allocate for real?

The strings it hands out are returned to callers and dropped through the global allocator,
so they have to be real allocations. MockHeap only sits in front of SystemHeap to
count requests and to refuse them on demand. Clones share state through Arc<Mutex<_>>,
so a test can keep one clone for assertions and pass another to the code under test.
*/

/// Allocation-tracking heap for testing.
///
/// # Examples
///
/// ```
/// use greeter_base::{Heap, MockHeap};
///
/// let heap = MockHeap::new();
/// heap.fail_after(1);
/// assert!(heap.allocate_string(8).is_ok());
/// assert!(heap.allocate_string(8).is_err());
/// assert_eq!(heap.allocation_count(), 1);
/// assert_eq!(heap.failure_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHeap {
    state: Arc<Mutex<MockHeapState>>,
}

#[derive(Debug, Default)]
struct MockHeapState {
    allocations: usize,
    bytes_allocated: usize,
    failures: usize,
    /// Remaining allocations to grant before refusing; `None` means unlimited.
    remaining: Option<usize>,
    /// Largest single request that will be granted.
    capacity_limit: Option<usize>,
}

impl MockHeap {
    /// Create a heap that grants every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every subsequent allocation.
    pub fn fail_all(&self) {
        self.state().remaining = Some(0);
    }

    /// Grant the next `count` allocations, then refuse.
    pub fn fail_after(&self, count: usize) {
        self.state().remaining = Some(count);
    }

    /// Refuse any single request larger than `bytes`.
    pub fn set_capacity_limit(&self, bytes: usize) {
        self.state().capacity_limit = Some(bytes);
    }

    /// Grant every request again; counters are kept.
    pub fn reset_failures(&self) {
        let mut state = self.state();
        state.remaining = None;
        state.capacity_limit = None;
    }

    /// Number of allocations granted so far.
    pub fn allocation_count(&self) -> usize {
        self.state().allocations
    }

    /// Total bytes requested by granted allocations.
    pub fn bytes_allocated(&self) -> usize {
        self.state().bytes_allocated
    }

    /// Number of requests refused so far.
    pub fn failure_count(&self) -> usize {
        self.state().failures
    }

    fn state(&self) -> MutexGuard<'_, MockHeapState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Heap for MockHeap {
    fn allocate_bytes(&self, capacity: usize) -> GreeterResult<Vec<u8>> {
        let mut state = self.state();
        let exhausted = state.remaining == Some(0);
        let too_large = state.capacity_limit.is_some_and(|limit| capacity > limit);
        if exhausted || too_large {
            state.failures += 1;
            debug!(capacity, exhausted, too_large, "mock heap refused allocation");
            return Err(Box::new(GreeterError::allocation_failure(capacity, None)));
        }

        let buffer = match SystemHeap.allocate_bytes(capacity) {
            Ok(buffer) => buffer,
            Err(e) => {
                state.failures += 1;
                return Err(e);
            }
        };
        if let Some(remaining) = state.remaining.as_mut() {
            *remaining -= 1;
        }
        state.allocations += 1;
        state.bytes_allocated += capacity;
        Ok(buffer)
    }
}
