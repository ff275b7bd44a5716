//! Lucas numbers, `L(n) = L(n − 1) + L(n − 2)`, `L(0) = 2`, `L(1) = 1`.
//!
//! Misses are answered by `L(n) = F(n − 1) + F(n + 1)` against a Fibonacci
//! instance, which keeps its own cache and gate.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};

use super::{below, default_cache, linear_cursor_from, Memo, SharedCache};
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::SequenceError;
use crate::recurrence::FibonacciNumber;
use crate::traits::Sequence;

const COEFFICIENTS: &[i64] = &[1, 1];
const SEEDS: &[i64] = &[2, 1];
const WARM_UP: usize = 100;

/// The Lucas numbers (A000032).
///
/// ```
/// use seqkit::prelude::*;
///
/// let lucas = LucasNumber::new();
/// let first: Vec<String> = lucas.cursor().take(8).map(|v| v.to_string()).collect();
/// assert_eq!(first, ["2", "1", "3", "4", "7", "11", "18", "29"]);
/// ```
#[derive(Debug)]
pub struct LucasNumber {
    memo: Memo,
    fibonacci: Arc<FibonacciNumber>,
}

impl LucasNumber {
    /// Creates an instance with its own cache over the shared Fibonacci
    /// instance.
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<LucasNumber>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Creates an instance over `cache`, warming it up if uninitialized.
    pub fn with_cache(cache: SharedCache) -> Self {
        Self::with_parts(cache, FibonacciNumber::shared())
    }

    /// Creates an instance over `cache` delegating to `fibonacci`.
    pub fn with_parts(cache: SharedCache, fibonacci: Arc<FibonacciNumber>) -> Self {
        let lucas = Self {
            memo: Memo::new(cache),
            fibonacci,
        };
        lucas
            .memo
            .warm_up("A000032", &mut lucas.cursor(), WARM_UP);
        lucas
    }

    fn resolve(&self, n: usize) -> Result<BigInt, SequenceError> {
        self.memo.resolve(n, 0, SEEDS, |_| {
            let before = self.fibonacci.get(below(n, 1)?)?;
            let after = self.fibonacci.get(n + 1)?;
            Ok(before + after)
        })
    }
}

impl Default for LucasNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for LucasNumber {
    fn catalog_id(&self) -> &str {
        "A000032"
    }

    fn get(&self, n: usize) -> Result<BigInt, SequenceError> {
        let _gate = self.memo.lock();
        self.resolve(n)
    }

    fn cursor(&self) -> SequenceCursor<BigInt> {
        ListCursor::new(LinearStep::from_seeds(COEFFICIENTS, SEEDS)).boxed()
    }

    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<BigInt>, SequenceError> {
        linear_cursor_from(COEFFICIENTS, SEEDS.len(), start, |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NullSequenceCache;

    #[test]
    fn fibonacci_identity_matches_recurrence() {
        let lucas = LucasNumber::with_cache(Arc::new(NullSequenceCache));
        let mut cursor = lucas.cursor();
        for n in 0..300 {
            assert_eq!(lucas.get(n).unwrap(), cursor.next_element().unwrap(), "L({n})");
        }
    }

    #[test]
    fn private_fibonacci_instance() {
        let fib = Arc::new(FibonacciNumber::with_cache(Arc::new(NullSequenceCache)));
        let lucas = LucasNumber::with_parts(Arc::new(NullSequenceCache), fib);
        assert_eq!(lucas.get(50).unwrap(), BigInt::from(28_143_753_123u64));
    }

    #[test]
    fn seeds_are_not_fibonacci_derived() {
        let lucas = LucasNumber::new();
        assert_eq!(lucas.get(0).unwrap(), BigInt::from(2));
        assert_eq!(lucas.get(1).unwrap(), BigInt::from(1));
        assert!(lucas.is_unique());
    }

    #[test]
    fn shared_is_one_instance() {
        let a = LucasNumber::shared();
        let b = LucasNumber::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
