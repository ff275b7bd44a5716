//! Fibonacci numbers, `F(n) = F(n − 1) + F(n − 2)`, `F(0) = 0`, `F(1) = 1`.
//!
//! A miss is resolved with the tripling identities on `m = n / 3`:
//!
//! ```text
//!   F(3m)     = 2·F(m)³ + 3·F(m+1)·F(m)·F(m−1)
//!   F(3m + 1) = F(m+1)³ + 3·F(m+1)·F(m)² − F(m)³
//!   F(3m + 2) = F(m+1)³ + 3·F(m+1)²·F(m) + F(m)³
//! ```
//!
//! so `get(n)` touches O(log n) indices. `F(2)` is a seed alongside `F(0)` and
//! `F(1)`: below 3 the identities would need `F(−1)`.

use num_bigint::BigInt;
use std::sync::{Arc, OnceLock};

use super::{below, default_cache, linear_cursor_from, Memo, SharedCache};
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::SequenceError;
use crate::traits::Sequence;

const COEFFICIENTS: &[i64] = &[1, 1];
const SEEDS: &[i64] = &[0, 1];
const RESOLVE_SEEDS: &[i64] = &[0, 1, 1];
const WARM_UP: usize = 100;

/// The Fibonacci numbers (A000045).
///
/// ```
/// use seqkit::prelude::*;
///
/// let fib = FibonacciNumber::new();
/// assert_eq!(fib.get(100).unwrap().to_string(), "354224848179261915075");
/// assert!(!fib.is_unique()); // F(1) == F(2)
/// ```
#[derive(Debug)]
pub struct FibonacciNumber {
    memo: Memo,
}

impl FibonacciNumber {
    /// Creates an instance with its own in-memory cache.
    pub fn new() -> Self {
        Self::with_cache(default_cache())
    }

    /// Creates an instance over `cache`, warming it up if uninitialized.
    pub fn with_cache(cache: SharedCache) -> Self {
        let fib = Self {
            memo: Memo::new(cache),
        };
        fib.memo.warm_up("A000045", &mut fib.cursor(), WARM_UP);
        fib
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<FibonacciNumber>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    fn resolve(&self, n: usize, depth: usize) -> Result<BigInt, SequenceError> {
        self.memo.resolve(n, depth, RESOLVE_SEEDS, |depth| {
            let m = n / 3;
            let f0 = self.resolve(m, depth)?;
            let f1 = self.resolve(m + 1, depth)?;
            let value = match n % 3 {
                0 => {
                    let fm = self.resolve(below(m, 1)?, depth)?;
                    f0.pow(3) * 2 + &f1 * &f0 * fm * 3
                },
                1 => f1.pow(3) + &f1 * f0.pow(2) * 3 - f0.pow(3),
                _ => f1.pow(3) + f1.pow(2) * &f0 * 3 + f0.pow(3),
            };
            Ok(value)
        })
    }
}

impl Default for FibonacciNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<BigInt> for FibonacciNumber {
    fn catalog_id(&self) -> &str {
        "A000045"
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
