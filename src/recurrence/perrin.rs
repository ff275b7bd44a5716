//! Perrin sequence, `P(n) = P(n − 2) + P(n − 3)`, seeds `3, 0, 2`.
//!
//! With `u, v, w = P(m − 1), P(m), P(m + 1)` and `m = n / 2`:
//!
//! ```text
//!   23·P(2m)     = 7v² − 6u² − 2w² − 4uv + 18uw + 6vw
//!   23·P(2m + 1) = 9u² + v² + 3w² + 6uv − 4uw + 14vw
//! ```
//!
//! The division is exact; a remainder means the inputs were wrong and is
//! reported as an internal-consistency error rather than rounded away.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};
use num_traits::Zero;

use super::{below, default_cache, linear_cursor_from, Memo, SharedCache};
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::{InvariantError, SequenceError};
use crate::traits::Sequence;

const COEFFICIENTS: &[i64] = &[1, 1, 0];
const SEEDS: &[i64] = &[3, 0, 2];
const WARM_UP: usize = 100;
const DENOMINATOR: u32 = 23;

/// The Perrin sequence (A001608).
///
/// ```
/// use num_bigint::BigInt;
/// use seqkit::prelude::*;
///
/// // p divides P(p) for every prime p
/// let perrin = PerrinSequence::new();
/// for p in [101u32, 103, 107] {
///     let value = perrin.get(p as usize).unwrap();
///     assert_eq!(value % p, BigInt::from(0));
/// }
/// ```
#[derive(Debug)]
pub struct PerrinSequence {
    memo: Memo,
}

impl PerrinSequence {
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PerrinSequence>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    pub fn with_cache(cache: SharedCache) -> Self {
        let perrin = Self {
            memo: Memo::new(cache),
        };
        perrin
            .memo
            .warm_up("A001608", &mut perrin.cursor(), WARM_UP);
        perrin
    }

    fn resolve(&self, n: usize, depth: usize) -> Result<BigInt, SequenceError> {
        self.memo.resolve(n, depth, SEEDS, |depth| {
            let m = n / 2;
            let u = self.resolve(below(m, 1)?, depth)?;
            let v = self.resolve(m, depth)?;
            let w = self.resolve(m + 1, depth)?;

            let x: BigInt = if n % 2 == 0 {
                &v * &v * 7 - &u * &u * 6 - &w * &w * 2 - &u * &v * 4 + &u * &w * 18 + &v * &w * 6
            } else {
                &u * &u * 9 + &v * &v + &w * &w * 3 + &u * &v * 6 - &u * &w * 4 + &v * &w * 14
            };

            let remainder = &x % DENOMINATOR;
            if !remainder.is_zero() {
                return Err(InvariantError::new(format!(
                    "Perrin identity for index {n} left remainder {remainder} mod {DENOMINATOR}"
                ))
                .into());
            }
            Ok(x / DENOMINATOR)
        })
    }
}

impl Default for PerrinSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for PerrinSequence {
    fn catalog_id(&self) -> &str {
        "A001608"
    }

    fn is_unique(&self) -> bool {
        false
    }

    fn get(&self, n: usize) -> Result<BigInt, SequenceError> {
        let _gate = self.memo.lock();
        self.resolve(n, 0)
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
    use crate::cache::{InMemorySequenceCache, NullSequenceCache};
    use crate::traits::SequenceCache;
    use std::sync::Arc;

    #[test]
    fn identity_matches_recurrence() {
        let perrin = PerrinSequence::with_cache(Arc::new(NullSequenceCache));
        let mut cursor = perrin.cursor();
        for n in 0..300 {
            assert_eq!(perrin.get(n).unwrap(), cursor.next_element().unwrap(), "P({n})");
        }
    }

    #[test]
    fn corrupted_cache_surfaces_invariant_error() {
        let cache: Arc<dyn SequenceCache<BigInt>> = Arc::new(InMemorySequenceCache::new(64));
        cache.initialize(Vec::new()).unwrap();
        let perrin = PerrinSequence::with_cache(cache.clone());

        // P(3) is 3; the wrong value breaks the identity from P(4) upward.
        cache.put(3, BigInt::from(4));
        let err = perrin.get(7).unwrap_err();
        assert!(matches!(err, SequenceError::Invariant(_)), "{err}");
    }

    #[test]
    fn large_index() {
        let perrin = PerrinSequence::new();
        let p = perrin.get(1_000).unwrap();
        let mut cursor = perrin.cursor_from(997).unwrap();
        let p997 = cursor.next_element().unwrap();
        let p998 = cursor.next_element().unwrap();
        assert_eq!(p, p997 + p998);
    }

    #[test]
    fn shared_is_one_instance() {
        let a = PerrinSequence::shared();
        let b = PerrinSequence::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
