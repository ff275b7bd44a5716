//! Unified builder for the recurrence sequences.
//!
//! Picks a recurrence by [`RecurrenceKind`] and wires it to a cache configured
//! here, hiding which concrete engine type backs it.
//!
//! ## Example
//!
//! ```rust
//! use seqkit::builder::{RecurrenceKind, SequenceBuilder};
//!
//! let pell = SequenceBuilder::new()
//!     .cache_capacity(256)
//!     .build(RecurrenceKind::Pell);
//! assert_eq!(pell.catalog_id(), "A000129");
//! assert_eq!(pell.get(10).unwrap().to_string(), "2378");
//! ```

use std::sync::Arc;

use num_bigint::BigInt;

use crate::cache::{InMemorySequenceCache, NullSequenceCache, DEFAULT_DYNAMIC_CAPACITY};
use crate::error::ConfigError;
use crate::recurrence::{
    FactorialNumber, FibonacciNumber, LucasNumber, PadovanSequence, PellNumber, PerrinSequence,
    SharedCache,
};
use crate::traits::Sequence;

/// Available recurrence sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceKind {
    /// Fibonacci numbers, A000045.
    Fibonacci,
    /// Lucas numbers, A000032.
    Lucas,
    /// Pell numbers, A000129.
    Pell,
    /// Padovan sequence, A000931.
    Padovan,
    /// Perrin sequence, A001608.
    Perrin,
    /// Factorials, A000142.
    Factorial,
}

impl RecurrenceKind {
    /// Every kind, in catalog order of the table in [`crate::recurrence`].
    pub const ALL: [RecurrenceKind; 6] = [
        RecurrenceKind::Fibonacci,
        RecurrenceKind::Lucas,
        RecurrenceKind::Pell,
        RecurrenceKind::Padovan,
        RecurrenceKind::Perrin,
        RecurrenceKind::Factorial,
    ];

    /// OEIS identifier of the sequence.
    pub const fn catalog_id(self) -> &'static str {
        match self {
            RecurrenceKind::Fibonacci => "A000045",
            RecurrenceKind::Lucas => "A000032",
            RecurrenceKind::Pell => "A000129",
            RecurrenceKind::Padovan => "A000931",
            RecurrenceKind::Perrin => "A001608",
            RecurrenceKind::Factorial => "A000142",
        }
    }

    /// Looks a kind up by its OEIS identifier.
    pub fn from_catalog_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.catalog_id() == id)
    }

    /// The process-wide instance of this sequence.
    pub fn shared(self) -> Arc<dyn Sequence<BigInt>> {
        match self {
            RecurrenceKind::Fibonacci => FibonacciNumber::shared(),
            RecurrenceKind::Lucas => LucasNumber::shared(),
            RecurrenceKind::Pell => PellNumber::shared(),
            RecurrenceKind::Padovan => PadovanSequence::shared(),
            RecurrenceKind::Perrin => PerrinSequence::shared(),
            RecurrenceKind::Factorial => FactorialNumber::shared(),
        }
    }
}

impl std::fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecurrenceKind::Fibonacci => "fibonacci",
            RecurrenceKind::Lucas => "lucas",
            RecurrenceKind::Pell => "pell",
            RecurrenceKind::Padovan => "padovan",
            RecurrenceKind::Perrin => "perrin",
            RecurrenceKind::Factorial => "factorial",
        };
        f.write_str(name)
    }
}

/// Builder for recurrence sequences.
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    capacity: usize,
    memoize: bool,
    read_only: bool,
}

impl SequenceBuilder {
    /// Builder with an in-memory cache of the default dynamic capacity.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_DYNAMIC_CAPACITY,
            memoize: true,
            read_only: false,
        }
    }

    /// Sets the dynamic-tier capacity of the in-memory cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.memoize = true;
        self
    }

    /// Uses a [`NullSequenceCache`]; every lookup recomputes from seeds.
    pub fn without_cache(mut self) -> Self {
        self.memoize = false;
        self
    }

    /// Freezes the cache after warm-up, so later lookups never store.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Builds a sequence of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build(&self, kind: RecurrenceKind) -> Box<dyn Sequence<BigInt>> {
        match self.try_build(kind) {
            Ok(sequence) => sequence,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a sequence of the given kind, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an in-memory cache is requested with a
    /// capacity of zero.
    pub fn try_build(&self, kind: RecurrenceKind) -> Result<Box<dyn Sequence<BigInt>>, ConfigError> {
        self.try_build_with_cache(kind).map(|(sequence, _)| sequence)
    }

    /// Like [`try_build`](Self::try_build), also returning the cache handle
    /// the sequence was built over.
    ///
    /// # Errors
    ///
    /// See [`try_build`](Self::try_build).
    pub fn try_build_with_cache(
        &self,
        kind: RecurrenceKind,
    ) -> Result<(Box<dyn Sequence<BigInt>>, SharedCache), ConfigError> {
        let cache = self.cache()?;
        let sequence: Box<dyn Sequence<BigInt>> = match kind {
            RecurrenceKind::Fibonacci => Box::new(FibonacciNumber::with_cache(cache.clone())),
            RecurrenceKind::Lucas => Box::new(LucasNumber::with_cache(cache.clone())),
            RecurrenceKind::Pell => Box::new(PellNumber::with_cache(cache.clone())),
            RecurrenceKind::Padovan => Box::new(PadovanSequence::with_cache(cache.clone())),
            RecurrenceKind::Perrin => Box::new(PerrinSequence::with_cache(cache.clone())),
            RecurrenceKind::Factorial => Box::new(FactorialNumber::with_cache(cache.clone())),
        };
        if self.read_only {
            cache.set_read_only(true);
        }
        Ok((sequence, cache))
    }

    fn cache(&self) -> Result<SharedCache, ConfigError> {
        if !self.memoize {
            return Ok(Arc::new(NullSequenceCache));
        }
        if self.capacity == 0 {
            return Err(ConfigError::new(
                "cache_capacity must be > 0; use without_cache() to disable memoization",
            ));
        }
        Ok(Arc::new(InMemorySequenceCache::new(self.capacity)))
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
