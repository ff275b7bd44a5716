//! # Sequence and Cache Traits
//!
//! This module defines the two contracts every part of the crate is written
//! against: [`Sequence`], the capability set of a semi-infinite integer
//! sequence, and [`SequenceCache`], the index→value memo that sequences consult
//! before computing anything.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │              Sequence<E>                │
//!   │                                         │
//!   │  catalog_id(&) → &str                   │
//!   │  is_unique(&) → bool                    │
//!   │  size(&) → Option<usize>                │
//!   │  get(&, n) → Result<E>                  │
//!   │  cursor(&) → SequenceCursor<E>          │
//!   │  cursor_from(&, n) → Result<Cursor>     │
//!   │  sub_list(&, from, to) → Result<List>   │
//!   └───────────────────┬─────────────────────┘
//!                       │ consults on get(n)
//!                       ▼
//!   ┌─────────────────────────────────────────┐
//!   │           SequenceCache<E>              │
//!   │                                         │
//!   │  initialize(&, Vec<E>)                  │
//!   │  initialize_from(&, iter, count)        │
//!   │  get(&, n) → Option<E>    (miss = None) │
//!   │  put(&, n, E)     (no-op if read-only)  │
//!   │  reset(&)         (dynamic tier only)   │
//!   │  is_read_only / set_read_only           │
//!   └─────────────────────────────────────────┘
//!         ▲                            ▲
//!         │                            │
//!   InMemorySequenceCache        NullSequenceCache
//!   (permanent + FIFO tier)      (always misses)
//! ```
//!
//! ## Why Both Traits Take `&self`
//!
//! A sequence instance is shared between threads (`Arc<FibonacciNumber>`), and
//! its cache is shared with it. Both therefore use interior mutability and are
//! `Send + Sync`; callers never need an outer lock.
//!
//! ## Plugging In a Cache
//!
//! Any type implementing [`SequenceCache`] can back a recurrence. A cache
//! backed by durable storage only needs the same miss/put semantics:
//!
//! ```
//! use std::sync::Arc;
//! use num_bigint::BigInt;
//! use seqkit::prelude::*;
//!
//! let cache: Arc<dyn SequenceCache<BigInt>> = Arc::new(InMemorySequenceCache::new(64));
//! let fib = FibonacciNumber::with_cache(cache.clone());
//!
//! assert_eq!(fib.get(200).unwrap(), fib.get(200).unwrap());
//! assert!(cache.get(200).is_some());
//! ```

use crate::cursor::SequenceCursor;
use crate::error::SequenceError;
use crate::list::SequenceList;

/// Index→value memo consulted by sequences.
///
/// Two tiers are expected: a permanent prefix `[0, permanent_len)` filled once
/// by [`initialize`](Self::initialize), and a bounded dynamic tier filled by
/// [`put`](Self::put). A miss is `None`, never an error; computing and storing
/// the value is the caller's job.
pub trait SequenceCache<E>: Send + Sync {
    /// Returns `true` if [`put`](Self::put) is currently ignored.
    fn is_read_only(&self) -> bool;

    /// Toggles mutability of the dynamic tier.
    fn set_read_only(&self, read_only: bool);

    /// Returns `true` once the permanent tier has been populated.
    fn is_initialized(&self) -> bool;

    /// Populates the permanent tier.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AlreadyInitialized`] on every call after the
    /// first.
    fn initialize(&self, values: Vec<E>) -> Result<(), SequenceError>;

    /// Populates the permanent tier with up to `count` values from `source`.
    ///
    /// `source` is not consumed when the cache is already initialized.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AlreadyInitialized`] on every call after the
    /// first.
    fn initialize_from(
        &self,
        source: &mut dyn Iterator<Item = E>,
        count: usize,
    ) -> Result<(), SequenceError> {
        if self.is_initialized() {
            return Err(SequenceError::AlreadyInitialized);
        }
        self.initialize(source.take(count).collect())
    }

    /// Returns the cached value at `n`, or `None` on a miss.
    fn get(&self, n: usize) -> Option<E>;

    /// Stores `value` at `n` in the dynamic tier.
    ///
    /// Silently ignored on a read-only cache and for indices already covered
    /// by the permanent tier.
    fn put(&self, n: usize, value: E);

    /// Clears the dynamic tier. The permanent tier is kept.
    fn reset(&self);

    /// Number of indices covered by the permanent tier.
    fn permanent_len(&self) -> usize {
        0
    }
}

/// A lazily evaluated, conceptually infinite sequence indexed from 0.
///
/// # Example
///
/// ```
/// use seqkit::prelude::*;
///
/// fn first_terms<S: Sequence<E> + ?Sized, E: 'static>(seq: &S, n: usize) -> Vec<E> {
///     seq.cursor().take(n).collect()
/// }
///
/// let pell = PellNumber::new();
/// let terms: Vec<u64> = first_terms(&pell, 6)
///     .into_iter()
///     .map(|v| u64::try_from(v).unwrap())
///     .collect();
/// assert_eq!(terms, vec![0, 1, 2, 5, 12, 29]);
/// ```
pub trait Sequence<E: 'static>: Send + Sync {
    /// Stable external identifier, e.g. an OEIS number such as `"A000045"`.
    ///
    /// Used for attribution only; may be empty for ad-hoc sequences.
    fn catalog_id(&self) -> &str;

    /// Declares whether no value appears twice. Not enforced.
    fn is_unique(&self) -> bool {
        true
    }

    /// Number of elements, or `None` for an unbounded sequence.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns the element at `n`, computing and caching it on a miss.
    fn get(&self, n: usize) -> Result<E, SequenceError>;

    /// Bidirectional cursor positioned before element 0.
    fn cursor(&self) -> SequenceCursor<E>;

    /// Bidirectional cursor positioned before element `start`.
    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<E>, SequenceError>;

    /// Alias of [`cursor`](Self::cursor) for `for` loops and adapters.
    fn iter(&self) -> SequenceCursor<E> {
        self.cursor()
    }

    /// Materializes the finite, immutable view `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] if `from >= to`.
    fn sub_list(&self, from: usize, to: usize) -> Result<SequenceList<E>, SequenceError> {
        if from >= to {
            return Err(SequenceError::invalid(format!(
                "from ({from}) must be smaller than to ({to})"
            )));
        }

        let mut cursor = self.cursor_from(from)?;
        let mut elements = Vec::with_capacity(to - from);
        while elements.len() < to - from && cursor.has_next() {
            elements.push(cursor.next_element()?);
        }

        Ok(SequenceList::new(elements, self.catalog_id(), self.is_unique()))
    }
}
