//! # Recurrence Sequences
//!
//! Integer sequences defined by a recurrence, evaluated lazily over
//! [`BigInt`] and memoized in a pluggable [`SequenceCache`].
//!
//! ## Engines
//!
//! | Sequence            | Catalog | Seeds     | `get(n)` on a miss                  | Warm-up |
//! |---------------------|---------|-----------|-------------------------------------|---------|
//! | [`FibonacciNumber`] | A000045 | 0, 1, 1   | tripling identity on `n mod 3`      | 100     |
//! | [`LucasNumber`]     | A000032 | 2, 1      | `F(n − 1) + F(n + 1)`               | 100     |
//! | [`PellNumber`]      | A000129 | 0, 1      | walk forward from a cached window   | 10      |
//! | [`PadovanSequence`] | A000931 | 1, 0, 0   | walk forward from a cached window   | 20      |
//! | [`PerrinSequence`]  | A001608 | 3, 0, 2   | halving identity over 23            | 100     |
//! | [`FactorialNumber`] | A000142 | 1         | product from a cached predecessor   | 10      |
//!
//! ## Evaluation
//!
//! ```text
//!   get(n)
//!     │
//!     ├─ lock gate (one per sequence instance)
//!     │
//!     └─ resolve(n, depth = 0)
//!          ├─ depth > 128      → Err(Invariant)
//!          ├─ n is a seed      → seed value        (never touches the cache)
//!          ├─ cache.get(n)     → hit
//!          └─ miss             → compute from resolve(m, depth + 1) ...
//!                                cache.put(n, value)
//! ```
//!
//! The gate is taken once per public `get`; recursive sub-lookups go through
//! `resolve` under the same acquisition. Seeds are answered before the cache
//! is consulted, so evaluation terminates on a cache that stores nothing.
//!
//! ## Lock Order
//!
//! A gate may be held while taking the cache lock or another sequence's gate
//! (Lucas holds its gate while querying Fibonacci). Nothing takes a gate while
//! holding a cache lock.
//!
//! ## Warm-up
//!
//! Constructors fill the permanent tier of an uninitialized cache from a fresh
//! cursor. A cache that is already initialized (shared with another instance,
//! or a [`NullSequenceCache`](crate::cache::NullSequenceCache)) is used as is.

pub mod factorial;
pub mod fibonacci;
pub mod lucas;
pub mod padovan;
pub mod pell;
pub mod perrin;

pub use factorial::{FactorialNumber, FactorialStep};
pub use fibonacci::FibonacciNumber;
pub use lucas::LucasNumber;
pub use padovan::PadovanSequence;
pub use pell::PellNumber;
pub use perrin::PerrinSequence;

use num_bigint::BigInt;
use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::cache::InMemorySequenceCache;
use crate::cursor::{LinearStep, ListCursor, SequenceCursor};
use crate::error::{InvariantError, SequenceError};
use crate::traits::SequenceCache;

/// Deepest recursive sub-lookup a single `get` may reach.
pub const MAX_RESOLVE_DEPTH: usize = 128;

/// Cache handle type accepted by every recurrence constructor.
pub type SharedCache = Arc<dyn SequenceCache<BigInt>>;

pub(crate) fn default_cache() -> SharedCache {
    Arc::new(InMemorySequenceCache::default())
}

/// Memo shared by every recurrence: the cache plus the per-instance gate.
pub(crate) struct Memo {
    cache: SharedCache,
    gate: Mutex<()>,
}

impl Memo {
    pub(crate) fn new(cache: SharedCache) -> Self {
        Self {
            cache,
            gate: Mutex::new(()),
        }
    }

    pub(crate) fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Fills the permanent tier from `source` unless the cache is initialized.
    pub(crate) fn warm_up(
        &self,
        catalog_id: &'static str,
        source: &mut dyn Iterator<Item = BigInt>,
        count: usize,
    ) {
        if self.cache.is_initialized() {
            return;
        }
        match self.cache.initialize_from(source, count) {
            Ok(()) | Err(SequenceError::AlreadyInitialized) => {},
            Err(err) => {
                tracing::warn!(catalog_id, error = %err, "cache warm-up failed");
            },
        }
    }

    /// Serializes miss → compute → store for one sequence instance.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock()
    }

    /// Resolves `n` from seeds, then the cache, then `compute`.
    ///
    /// `compute` receives the depth its own sub-lookups must pass on.
    pub(crate) fn resolve<F>(
        &self,
        n: usize,
        depth: usize,
        seeds: &[i64],
        compute: F,
    ) -> Result<BigInt, SequenceError>
    where
        F: FnOnce(usize) -> Result<BigInt, SequenceError>,
    {
        if depth > MAX_RESOLVE_DEPTH {
            return Err(InvariantError::new(format!(
                "recursion depth exceeded {MAX_RESOLVE_DEPTH} while resolving index {n}"
            ))
            .into());
        }
        if let Some(&seed) = seeds.get(n) {
            return Ok(BigInt::from(seed));
        }
        if let Some(value) = self.cache.get(n) {
            return Ok(value);
        }

        let value = compute(depth + 1)?;
        self.cache.put(n, value.clone());
        Ok(value)
    }

    fn known(&self, i: usize, seeds: &[i64]) -> Option<BigInt> {
        match seeds.get(i) {
            Some(&seed) => Some(BigInt::from(seed)),
            None => self.cache.get(i),
        }
    }

    /// Computes `a(n)` of a linear recurrence by stepping forward from the
    /// nearest run of `order` known values below `n`, storing each
    /// intermediate term.
    ///
    /// Requires `n >= seeds.len()`; `n` itself is stored by the caller.
    pub(crate) fn walk_linear(
        &self,
        n: usize,
        coefficients: &[i64],
        seeds: &[i64],
    ) -> Result<BigInt, SequenceError> {
        let order = seeds.len();
        let mut window: VecDeque<BigInt> = VecDeque::with_capacity(order);
        let mut i = n;
        while window.len() < order {
            i = i
                .checked_sub(1)
                .ok_or_else(|| InvariantError::new("no known window below index"))?;
            match self.known(i, seeds) {
                Some(value) => window.push_front(value),
                None => window.clear(),
            }
        }

        for idx in i + order..=n {
            let next: BigInt = coefficients
                .iter()
                .zip(&window)
                .map(|(c, w)| w * *c)
                .sum();
            window.pop_front();
            window.push_back(next.clone());
            if idx == n {
                return Ok(next);
            }
            self.cache.put(idx, next);
        }

        // Only reachable when `n` lies inside the known window.
        window
            .back()
            .cloned()
            .ok_or_else(|| InvariantError::new("recurrence window is empty").into())
    }
}

impl std::fmt::Debug for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("initialized", &self.cache.is_initialized())
            .field("permanent_len", &self.cache.permanent_len())
            .finish_non_exhaustive()
    }
}

/// Cursor before element `start` of a linear recurrence, seeded through `get`.
pub(crate) fn linear_cursor_from<G>(
    coefficients: &'static [i64],
    order: usize,
    start: usize,
    get: G,
) -> Result<SequenceCursor<BigInt>, SequenceError>
where
    G: Fn(usize) -> Result<BigInt, SequenceError>,
{
    let end = start
        .checked_add(order)
        .ok_or_else(|| SequenceError::invalid(format!("start index {start} is too large")))?;
    let window = (start..end).map(get).collect::<Result<VecDeque<_>, _>>()?;
    Ok(ListCursor::starting_at(LinearStep::new(coefficients, window), start).boxed())
}

/// Index `n - k`, failing instead of wrapping.
#[inline]
pub(crate) fn below(n: usize, k: usize) -> Result<usize, SequenceError> {
    n.checked_sub(k)
        .ok_or_else(|| SequenceError::invalid(format!("index {n} - {k} underflows")))
}
