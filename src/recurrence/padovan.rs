//! Padovan sequence, `P(n) = P(n − 2) + P(n − 3)`, seeds `1, 0, 0`.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};

use super::{default_cache, linear_cursor_from, Memo, SharedCache};
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::SequenceError;
use crate::traits::Sequence;

// a(i + 3) = a(i) + a(i + 1)
const COEFFICIENTS: &[i64] = &[1, 1, 0];
const SEEDS: &[i64] = &[1, 0, 0];
const WARM_UP: usize = 20;

/// The Padovan sequence (A000931), starting `1, 0, 0, 1, 0, 1, 1, 1, 2`.
///
/// Values repeat, so [`is_unique`](Sequence::is_unique) is `false`.
#[derive(Debug)]
pub struct PadovanSequence {
    memo: Memo,
}

impl PadovanSequence {
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PadovanSequence>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    pub fn with_cache(cache: SharedCache) -> Self {
        let padovan = Self {
            memo: Memo::new(cache),
        };
        padovan
            .memo
            .warm_up("A000931", &mut padovan.cursor(), WARM_UP);
        padovan
    }
}

impl Default for PadovanSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for PadovanSequence {
    fn catalog_id(&self) -> &str {
        "A000931"
    }

    fn is_unique(&self) -> bool {
        false
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
