//! Pell numbers, `P(n) = 2·P(n − 1) + P(n − 2)`, `P(0) = 0`, `P(1) = 1`.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};

use super::{default_cache, linear_cursor_from, Memo, SharedCache};
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::SequenceError;
use crate::traits::Sequence;

// a(i + 2) = 1·a(i) + 2·a(i + 1)
const COEFFICIENTS: &[i64] = &[1, 2];
const SEEDS: &[i64] = &[0, 1];
const WARM_UP: usize = 10;

/// The Pell numbers (A000129).
#[derive(Debug)]
pub struct PellNumber {
    memo: Memo,
}

impl PellNumber {
    /// Creates an instance with its own in-memory cache.
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PellNumber>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Creates an instance over `cache`, warming it up if uninitialized.
    pub fn with_cache(cache: SharedCache) -> Self {
        let pell = Self {
            memo: Memo::new(cache),
        };
        pell.memo.warm_up("A000129", &mut pell.cursor(), WARM_UP);
        pell
    }
}

impl Default for PellNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for PellNumber {
    fn catalog_id(&self) -> &str {
        "A000129"
    }

    fn get(&self, n: usize) -> Result<BigInt, SequenceError> {
        let _gate = self.memo.lock();
        self.memo.resolve(n, 0, SEEDS, |_| {
            self.memo.walk_linear(n, COEFFICIENTS, SEEDS)
        })
    }

    fn cursor(&self) -> SequenceCursor<BigInt> {
        ListCursor::new(LinearStep::from_seeds(COEFFICIENTS, SEEDS)).boxed()
    }

    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<BigInt>, SequenceError> {
        linear_cursor_from(COEFFICIENTS, SEEDS.len(), start, |i| self.get(i))
    }
}
