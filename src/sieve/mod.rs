//! # Prime Sieves
//!
//! Growable primality tables shared by [`PrimeSequence`](crate::prime::PrimeSequence)
//! and by callers that need raw `is_prime` / `nth_prime` answers.
//!
//! ## Architecture
//!
//! ```text
//!   Sieve<G: SieveGrid>
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ grid: RwLock<G>                 prime_cache: Vec<usize>      │
//!   │ ┌──────────────────────────┐    ┌──────────────────────────┐ │
//!   │ │ slot per integer [0, N)  │    │ first K primes, fixed    │ │
//!   │ │ AtkinGrid:  1 bit        │    │ [2, 3, 5, 7, 11, ...]    │ │
//!   │ │ FactorGrid: smallest     │    │                          │ │
//!   │ │             factor (u32) │    │ nth_prime(n < K) = O(1)  │ │
//!   │ └──────────────────────────┘    └──────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//!
//!   is_prime(n):
//!     read lock ── n < N ──► grid.is_prime(n)
//!         │
//!         └─ n >= N ──► write lock, recheck, rebuild at 3(n+1)/2 ──► retry
//! ```
//!
//! ## Growth
//!
//! The grid is never patched in place: a query past the end discards it and
//! builds a new one about 50% larger than the query. Capacity only ever grows,
//! so a value checked once stays answerable without another rebuild.
//!
//! Concurrent readers proceed in parallel. A rebuild blocks readers for its
//! duration; two threads racing past the end rebuild once since the second
//! rechecks under the write lock.
//!
//! ## Choosing a Grid
//!
//! | Grid          | Bytes / slot | Extra                                  |
//! |---------------|--------------|----------------------------------------|
//! | [`AtkinGrid`] | 1/8          | densest storage                        |
//! | [`FactorGrid`]| 4            | [`EratosthenesSieve::factorize`]       |
//!
//! ## Example
//!
//! ```
//! use seqkit::sieve::{AtkinSieve, PrimeSieve};
//!
//! let sieve = AtkinSieve::builder().initial_size(100).prime_cache_len(10).build();
//! assert!(sieve.is_prime(97));
//! assert_eq!(sieve.nth_prime(25), 101); // beyond the prime cache
//! assert!(sieve.capacity() > 101);      // grid grew on demand
//! assert_eq!(sieve.index_of(101), Some(25));
//! ```

pub mod atkin;
pub mod eratosthenes;
pub mod factor;

pub use atkin::{AtkinGrid, AtkinSieve};
pub use eratosthenes::{EratosthenesSieve, FactorGrid};
pub use factor::Factorization;

use crate::error::ConfigError;
use parking_lot::RwLock;
use std::marker::PhantomData;

/// Default initial grid size; holds the first 10 000 primes.
pub const DEFAULT_SIEVE_SIZE: usize = 104_730;

/// Default number of primes kept in the eager prime cache.
pub const DEFAULT_PRIME_CACHE_LEN: usize = 10_000;

/// Smallest accepted initial grid size, enough to hold 2 and 3.
pub const MIN_SIEVE_SIZE: usize = 4;

/// Storage strategy for a sieve grid.
pub trait SieveGrid: Send + Sync + Sized {
    /// Short name used in log records.
    const NAME: &'static str;

    /// Builds a grid answering primality for `[0, size)`.
    fn build(size: usize) -> Self;

    /// Number of slots.
    fn len(&self) -> usize;

    /// Returns `true` if the grid has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Primality of `n`. Only meaningful for `n < len()`.
    fn is_prime(&self, n: usize) -> bool;

    /// Approximate heap footprint in bytes.
    fn approx_bytes(&self) -> usize;
}

/// Primality queries over a growable table.
///
/// All queries grow the table as needed, so every method is total over
/// `usize` up to memory limits.
pub trait PrimeSieve: Send + Sync {
    /// Returns `true` if `n` is prime. 0 and 1 are not prime.
    fn is_prime(&self, n: usize) -> bool;

    /// Current number of grid slots.
    fn capacity(&self) -> usize;

    /// The `n`-th prime, counting from `nth_prime(0) == 2`.
    fn nth_prime(&self, n: usize) -> usize;

    /// Position of `candidate` among the primes, or `None` if it is not prime.
    fn index_of(&self, candidate: usize) -> Option<usize>;

    /// The smallest prime strictly greater than `p`.
    fn next_prime_after(&self, p: usize) -> usize;

    /// The largest prime strictly smaller than `p`.
    fn previous_prime_before(&self, p: usize) -> Option<usize>;

    /// Iterator over all primes in increasing order.
    fn primes(&self) -> Primes<'_>;
}

/// Integer square root, `floor(sqrt(n))`.
///
/// Seeds from `f64` and corrects, so it stays exact where the float loses
/// precision.
pub(crate) fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u128;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// Smallest `r` with `r * r >= n`.
pub(crate) fn ceil_sqrt(n: usize) -> usize {
    let r = isqrt(n as u128) as usize;
    if r * r < n {
        r + 1
    } else {
        r
    }
}

/// Grid length to rebuild at so that `n` is covered, always above `n`
/// unless `n` is `usize::MAX`.
#[inline]
fn growth_target(n: usize) -> usize {
    let covered = n.saturating_add(1);
    (covered.saturating_mul(3) / 2).max(covered)
}

// ---------------------------------------------------------------------------
// Sieve
// ---------------------------------------------------------------------------

/// Growable sieve over grid type `G`.
///
/// See [`AtkinSieve`] and [`EratosthenesSieve`] for the concrete types.
pub struct Sieve<G> {
    grid: RwLock<G>,
    prime_cache: Vec<usize>,
}

impl<G: SieveGrid> Sieve<G> {
    /// Creates an independent sieve with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SIEVE_SIZE, DEFAULT_PRIME_CACHE_LEN)
    }

    /// Returns a builder for a sieve with custom sizing.
    pub fn builder() -> SieveBuilder<G> {
        SieveBuilder::new()
    }

    fn with_config(initial_size: usize, prime_cache_len: usize) -> Self {
        let mut grid = G::build(initial_size);
        tracing::debug!(
            grid = G::NAME,
            size = grid.len(),
            bytes = grid.approx_bytes(),
            "built prime sieve"
        );

        let mut prime_cache = Vec::with_capacity(prime_cache_len);
        let mut n = 2;
        while prime_cache.len() < prime_cache_len {
            if n >= grid.len() {
                grid = G::build(growth_target(n));
                tracing::debug!(grid = G::NAME, size = grid.len(), "grew sieve for prime cache");
            }
            if grid.is_prime(n) {
                prime_cache.push(n);
            }
            n += 1;
        }

        Self {
            grid: RwLock::new(grid),
            prime_cache,
        }
    }

    /// Makes the grid cover `n`.
    fn ensure(&self, n: usize) {
        if n < self.grid.read().len() {
            return;
        }

        let mut grid = self.grid.write();
        if n >= grid.len() {
            let previous = grid.len();
            *grid = G::build(growth_target(n));
            tracing::debug!(
                grid = G::NAME,
                from = previous,
                to = grid.len(),
                "rebuilt prime sieve"
            );
        }
    }

    /// Primes computed eagerly at construction.
    pub fn prime_cache(&self) -> &[usize] {
        &self.prime_cache
    }

    /// Last cached prime and its index, if the cache is non-empty.
    fn cache_tail(&self) -> Option<(usize, usize)> {
        self.prime_cache
            .last()
            .map(|&p| (self.prime_cache.len() - 1, p))
    }

    /// Approximate heap footprint of the grid in bytes.
    pub fn approx_bytes(&self) -> usize {
        self.grid.read().approx_bytes()
    }
}

impl<G: SieveGrid> Default for Sieve<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SieveGrid> PrimeSieve for Sieve<G> {
    fn is_prime(&self, n: usize) -> bool {
        self.ensure(n);
        self.grid.read().is_prime(n)
    }

    fn capacity(&self) -> usize {
        self.grid.read().len()
    }

    fn nth_prime(&self, n: usize) -> usize {
        if let Some(&p) = self.prime_cache.get(n) {
            return p;
        }

        let (mut idx, mut p) = self.cache_tail().unwrap_or((0, 2));
        while idx < n {
            p = self.next_prime_after(p);
            idx += 1;
        }
        p
    }

    fn index_of(&self, candidate: usize) -> Option<usize> {
        if !self.is_prime(candidate) {
            return None;
        }

        let (base_idx, base) = match self.cache_tail() {
            Some((_, last)) if candidate <= last => {
                return self.prime_cache.binary_search(&candidate).ok();
            },
            Some(tail) => tail,
            None => (0, 2),
        };

        // `is_prime(candidate)` above already grew the grid past `candidate`.
        let grid = self.grid.read();
        let between = (base + 1..=candidate).filter(|&c| grid.is_prime(c)).count();
        Some(base_idx + between)
    }

    fn next_prime_after(&self, p: usize) -> usize {
        if p < 2 {
            return 2;
        }
        let mut candidate = if p % 2 == 0 { p + 1 } else { p + 2 };
        loop {
            if self.is_prime(candidate) {
                return candidate;
            }
            candidate += 2;
        }
    }

    fn previous_prime_before(&self, p: usize) -> Option<usize> {
        if p <= 2 {
            return None;
        }
        self.ensure(p);
        let grid = self.grid.read();
        (2..p).rev().find(|&c| grid.is_prime(c))
    }

    fn primes(&self) -> Primes<'_> {
        Primes::new(self)
    }
}

impl<G: SieveGrid> std::fmt::Debug for Sieve<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sieve")
            .field("grid", &G::NAME)
            .field("capacity", &self.capacity())
            .field("prime_cache_len", &self.prime_cache.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Primes iterator
// ---------------------------------------------------------------------------

/// Forward iterator over primes, growing the sieve as it goes.
pub struct Primes<'a> {
    sieve: &'a dyn PrimeSieve,
    last: Option<usize>,
}

impl<'a> Primes<'a> {
    /// Starts at 2.
    pub fn new(sieve: &'a dyn PrimeSieve) -> Self {
        Self { sieve, last: None }
    }

    /// Starts at the smallest prime strictly greater than `p`.
    pub fn after(sieve: &'a dyn PrimeSieve, p: usize) -> Self {
        Self {
            sieve,
            last: Some(p),
        }
    }
}

impl Iterator for Primes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let next = match self.last {
            None => 2,
            Some(p) => self.sieve.next_prime_after(p),
        };
        self.last = Some(next);
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::iter::FusedIterator for Primes<'_> {}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`Sieve`].
///
/// ```
/// use seqkit::sieve::{EratosthenesSieve, PrimeSieve};
///
/// let sieve = EratosthenesSieve::builder()
///     .initial_size(1_000)
///     .prime_cache_len(100)
///     .try_build()
///     .unwrap();
/// assert_eq!(sieve.prime_cache().len(), 100);
/// assert_eq!(sieve.nth_prime(99), 541);
/// ```
pub struct SieveBuilder<G> {
    initial_size: usize,
    prime_cache_len: usize,
    _grid: PhantomData<fn() -> G>,
}

impl<G: SieveGrid> SieveBuilder<G> {
    /// Builder with default sizing.
    pub fn new() -> Self {
        Self {
            initial_size: DEFAULT_SIEVE_SIZE,
            prime_cache_len: DEFAULT_PRIME_CACHE_LEN,
            _grid: PhantomData,
        }
    }

    /// Sets the initial number of grid slots.
    pub fn initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Sets how many primes are computed eagerly.
    pub fn prime_cache_len(mut self, len: usize) -> Self {
        self.prime_cache_len = len;
        self
    }

    /// Builds the sieve.
    ///
    /// # Panics
    ///
    /// Panics if `initial_size < 4`. For a non-panicking alternative, use
    /// [`try_build`](Self::try_build).
    pub fn build(self) -> Sieve<G> {
        match self.try_build() {
            Ok(sieve) => sieve,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds the sieve, validating parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `initial_size < 4`.
    pub fn try_build(self) -> Result<Sieve<G>, ConfigError> {
        if self.initial_size < MIN_SIEVE_SIZE {
            return Err(ConfigError::new(format!(
                "initial_size must be at least {MIN_SIEVE_SIZE}, got {}",
                self.initial_size
            )));
        }
        Ok(Sieve::with_config(self.initial_size, self.prime_cache_len))
    }
}

impl<G: SieveGrid> Default for SieveBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> std::fmt::Debug for SieveBuilder<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SieveBuilder")
            .field("initial_size", &self.initial_size)
            .field("prime_cache_len", &self.prime_cache_len)
            .finish()
    }
}
