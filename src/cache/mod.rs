//! [`SequenceCache`](crate::traits::SequenceCache) implementations.
//!
//! - [`InMemorySequenceCache`]: permanent prefix plus bounded insertion-order
//!   tier. The default for every recurrence.
//! - [`NullSequenceCache`]: stores nothing.

pub mod in_memory;
pub mod null;

pub use in_memory::{InMemorySequenceCache, DEFAULT_DYNAMIC_CAPACITY};
pub use null::NullSequenceCache;
