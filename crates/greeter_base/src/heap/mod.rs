/* 📖 # What is the heap abstraction?

Every owned string the engine hands out is allocated through the `Heap` trait.
- SystemHeap asks the global allocator, reporting refusal as an error instead of aborting
- MockHeap records every allocation and can be told to refuse, so the
  allocation-failure path can be exercised deterministically in tests

Code depends on the trait, not on which heap is behind it.
*/

pub mod mock;
pub mod system;
mod traits;

pub use mock::MockHeap;
pub use system::SystemHeap;
pub use traits::Heap;
