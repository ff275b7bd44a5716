//! seqkit: lazily evaluated integer sequences with sieve-backed primes and
//! tiered memoization.
//!
//! ## Layout
//!
//! ```text
//!   Sequence<E> ──────────────┬── recurrence::*   (BigInt, SequenceCache)
//!     get / cursor / sub_list ├── PrimeSequence   (PrimeSieve)
//!                             └── PolygonalNumber (closed form)
//!
//!   SequenceCache<E>: InMemorySequenceCache (permanent + dynamic tier)
//!                     NullSequenceCache     (stores nothing)
//!
//!   PrimeSieve: AtkinSieve, EratosthenesSieve (growable, shared())
//! ```
//!
//! ```
//! use seqkit::prelude::*;
//!
//! let fib = FibonacciNumber::new();
//! assert_eq!(fib.get(100).unwrap().to_string(), "354224848179261915075");
//!
//! let primes = PrimeSequence::new();
//! let first: Vec<usize> = primes.cursor().take(5).collect();
//! assert_eq!(first, vec![2, 3, 5, 7, 11]);
//! ```

pub mod builder;
pub mod cache;
pub mod cursor;
pub mod ds;
pub mod error;
pub mod figurate;
pub mod list;
pub mod prime;
pub mod recurrence;
pub mod sieve;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
