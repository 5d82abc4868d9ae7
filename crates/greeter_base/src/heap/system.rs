use tracing::{debug, instrument};

use crate::{GreeterError, GreeterResult};

use super::traits::Heap;

/// Heap backed by the global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHeap;

impl SystemHeap {
    pub fn new() -> Self {
        Self
    }
}

impl Heap for SystemHeap {
    #[instrument(level = "trace", skip(self))]
    fn allocate_bytes(&self, capacity: usize) -> GreeterResult<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity).map_err(|e| {
            debug!(capacity, error = %e, "system heap refused allocation");
            Box::new(GreeterError::allocation_failure(capacity, Some(e)))
        })?;
        Ok(buffer)
    }
}
