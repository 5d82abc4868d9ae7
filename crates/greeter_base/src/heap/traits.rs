use crate::{GreeterResult, err};

/* 📖 # Why is Heap a trait instead of calling Vec::with_capacity directly?

Vec::with_capacity aborts the process when the allocator refuses.
Going through a trait lets the real heap turn that refusal into an
AllocationFailure error, and lets tests substitute a heap that refuses on demand.
*/

/// Source of heap-allocated buffers.
///
/// Two implementations are provided:
/// - `SystemHeap`: the global allocator, with fallible reservation
/// - `MockHeap`: counts allocations and simulates failure for testing
///
/// # Examples
///
/// ```
/// use greeter_base::{Heap, SystemHeap};
///
/// let buffer = SystemHeap.allocate_string(16).unwrap();
/// assert!(buffer.is_empty());
/// assert!(buffer.capacity() >= 16);
/// ```
pub trait Heap: std::fmt::Debug + Send + Sync + 'static {
    /// Allocate an empty byte buffer able to hold exactly `capacity` bytes.
    ///
    /// Either the full capacity is reserved or an `AllocationFailure` error is
    /// returned; a partially sized buffer is never handed out.
    fn allocate_bytes(&self, capacity: usize) -> GreeterResult<Vec<u8>>;

    /// Same as `allocate_bytes`, for text.
    fn allocate_string(&self, capacity: usize) -> GreeterResult<String> {
        let bytes = self.allocate_bytes(capacity)?;
        String::from_utf8(bytes).map_err(|e| err!("Fresh buffer is not empty: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::MockHeap;

    #[test]
    fn test_allocate_string_goes_through_allocate_bytes() {
        let heap = MockHeap::new();
        let buffer = heap.allocate_string(4).unwrap();

        assert!(buffer.is_empty());
        assert_eq!(heap.allocation_count(), 1);
        assert_eq!(heap.bytes_allocated(), 4);
    }
}
