//! Factorials, `n! = n · (n − 1)!`, `0! = 1`.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};
use num_traits::One;

use super::{default_cache, Memo, SharedCache};
use crate::cursor::{ListCursor, SequenceCursor, Step};
use crate::error::SequenceError;
use crate::traits::Sequence;

const SEEDS: &[i64] = &[1];
const WARM_UP: usize = 10;

/// The factorial numbers (A000142).
///
/// `0! == 1!`, so [`is_unique`](Sequence::is_unique) is `false`.
#[derive(Debug)]
pub struct FactorialNumber {
    memo: Memo,
}

impl FactorialNumber {
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<FactorialNumber>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    pub fn with_cache(cache: SharedCache) -> Self {
        let factorial = Self {
            memo: Memo::new(cache),
        };
        factorial
            .memo
            .warm_up("A000142", &mut factorial.cursor(), WARM_UP);
        factorial
    }

    /// Multiplies forward from the nearest known predecessor of `n`.
    fn product_up_to(&self, n: usize) -> BigInt {
        let cache = self.memo.cache();
        let (mut i, mut value) = (1..n)
            .rev()
            .find_map(|i| cache.get(i).map(|v| (i, v)))
            .unwrap_or_else(|| (0, BigInt::one()));

        while i + 1 < n {
            i += 1;
            value *= i;
            cache.put(i, value.clone());
        }
        value * n
    }
}

impl Default for FactorialNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for FactorialNumber {
    fn catalog_id(&self) -> &str {
        "A000142"
    }

    fn is_unique(&self) -> bool {
        false
    }

    fn get(&self, n: usize) -> Result<BigInt, SequenceError> {
        let _gate = self.memo.lock();
        self.memo
            .resolve(n, 0, SEEDS, |_| Ok(self.product_up_to(n)))
    }

    fn cursor(&self) -> SequenceCursor<BigInt> {
        ListCursor::new(FactorialStep::new()).boxed()
    }

    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<BigInt>, SequenceError> {
        let value = self.get(start)?;
        Ok(ListCursor::starting_at(FactorialStep::at(value), start).boxed())
    }
}

/// Cursor step holding `i!` for the cursor position `i`.
#[derive(Debug, Clone)]
pub struct FactorialStep {
    value: BigInt,
}

impl FactorialStep {
    /// Step positioned at 0.
    pub fn new() -> Self {
        Self::at(BigInt::one())
    }

    /// Step whose current value is `value`, which must be `i!` for the
    /// position the cursor starts at.
    pub fn at(value: BigInt) -> Self {
        Self { value }
    }
}

impl Default for FactorialStep {
    fn default() -> Self {
        Self::new()
    }
}

impl Step for FactorialStep {
    type Item = BigInt;

    fn forward(&mut self, index: usize) -> Result<BigInt, SequenceError> {
        let current = self.value.clone();
        self.value *= index + 1;
        Ok(current)
    }

    fn backward(&mut self, index: usize) -> Result<BigInt, SequenceError> {
        self.value /= index + 1;
        Ok(self.value.clone())
    }
}
