//! Cache that never stores anything.

use crate::error::SequenceError;
use crate::traits::SequenceCache;

/// A [`SequenceCache`] that always misses.
///
/// Reports itself initialized and read-only so sequences skip warm-up and
/// never attempt to write. Useful for benchmarking raw computation and for
/// memory-constrained callers.
///
/// ```
/// use std::sync::Arc;
/// use seqkit::prelude::*;
///
/// let fib = FibonacciNumber::with_cache(Arc::new(NullSequenceCache));
/// assert_eq!(u64::try_from(fib.get(90).unwrap()).unwrap(), 2_880_067_194_370_816_120);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSequenceCache;

impl<E> SequenceCache<E> for NullSequenceCache {
    #[inline]
    fn is_read_only(&self) -> bool {
        true
    }

    #[inline]
    fn set_read_only(&self, _read_only: bool) {}

    #[inline]
    fn is_initialized(&self) -> bool {
        true
    }

    fn initialize(&self, _values: Vec<E>) -> Result<(), SequenceError> {
        Err(SequenceError::AlreadyInitialized)
    }

    #[inline]
    fn get(&self, _n: usize) -> Option<E> {
        None
    }

    #[inline]
    fn put(&self, _n: usize, _value: E) {}

    #[inline]
    fn reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_misses() {
        let cache = NullSequenceCache;
        SequenceCache::<u64>::put(&cache, 3, 9);
        assert_eq!(SequenceCache::<u64>::get(&cache, 3), None);
        assert_eq!(SequenceCache::<u64>::permanent_len(&cache), 0);
    }

    #[test]
    fn refuses_initialization() {
        let cache = NullSequenceCache;
        assert!(SequenceCache::<u64>::is_initialized(&cache));
        assert_eq!(
            cache.initialize(vec![1u64]),
            Err(SequenceError::AlreadyInitialized)
        );
    }

    #[test]
    fn stays_read_only() {
        let cache = NullSequenceCache;
        SequenceCache::<u64>::set_read_only(&cache, false);
        assert!(SequenceCache::<u64>::is_read_only(&cache));
    }
}
