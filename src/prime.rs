//! The primes as a [`Sequence`], backed by a shared [`PrimeSieve`].

use std::sync::Arc;

use crate::cursor::{ListCursor, SequenceCursor, Step};
use crate::error::{InvariantError, SequenceError};
use crate::sieve::{AtkinSieve, PrimeSieve};
use crate::traits::Sequence;

/// The prime numbers (A000040), `2, 3, 5, 7, 11, ...`.
///
/// ```
/// use seqkit::prelude::*;
///
/// let primes = PrimeSequence::new();
/// assert_eq!(primes.get(0).unwrap(), 2);
/// assert_eq!(primes.get(999).unwrap(), 7_919);
/// assert_eq!(primes.index_of(7_919), Some(999));
/// assert!(!primes.contains(7_917));
/// ```
#[derive(Clone)]
pub struct PrimeSequence {
    sieve: Arc<dyn PrimeSieve>,
}

impl PrimeSequence {
    /// Sequence over the process-wide Atkin sieve.
    pub fn new() -> Self {
        Self::with_sieve(AtkinSieve::shared())
    }

    /// Sequence over a caller-supplied sieve.
    pub fn with_sieve(sieve: Arc<dyn PrimeSieve>) -> Self {
        Self { sieve }
    }

    /// The underlying sieve.
    pub fn sieve(&self) -> &Arc<dyn PrimeSieve> {
        &self.sieve
    }

    /// Returns `true` if `p` is prime.
    pub fn contains(&self, p: usize) -> bool {
        self.sieve.is_prime(p)
    }

    /// Position of `p` in the sequence, or `None` if `p` is not prime.
    pub fn index_of(&self, p: usize) -> Option<usize> {
        self.sieve.index_of(p)
    }
}

impl Default for PrimeSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence<usize> for PrimeSequence {
    fn catalog_id(&self) -> &str {
        "A000040"
    }

    fn get(&self, n: usize) -> Result<usize, SequenceError> {
        Ok(self.sieve.nth_prime(n))
    }

    fn cursor(&self) -> SequenceCursor<usize> {
        ListCursor::new(PrimeStep::new(self.sieve.clone(), 2)).boxed()
    }

    fn cursor_from(&self, start: usize) -> Result<SequenceCursor<usize>, SequenceError> {
        let p = self.sieve.nth_prime(start);
        Ok(ListCursor::starting_at(PrimeStep::new(self.sieve.clone(), p), start).boxed())
    }
}

impl std::fmt::Debug for PrimeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimeSequence")
            .field("capacity", &self.sieve.capacity())
            .finish()
    }
}

/// Cursor step holding the prime at the cursor position.
pub struct PrimeStep {
    sieve: Arc<dyn PrimeSieve>,
    current: usize,
}

impl PrimeStep {
    /// Step whose current prime is `p`.
    pub fn new(sieve: Arc<dyn PrimeSieve>, p: usize) -> Self {
        Self { sieve, current: p }
    }
}

impl Step for PrimeStep {
    type Item = usize;

    fn forward(&mut self, _index: usize) -> Result<usize, SequenceError> {
        let p = self.current;
        self.current = self.sieve.next_prime_after(p);
        Ok(p)
    }

    fn backward(&mut self, index: usize) -> Result<usize, SequenceError> {
        self.current = self
            .sieve
            .previous_prime_before(self.current)
            .ok_or_else(|| InvariantError::new(format!("no prime below position {}", index + 1)))?;
        Ok(self.current)
    }
}

impl std::fmt::Debug for PrimeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimeStep")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::EratosthenesSieve;

    fn small_sequence() -> PrimeSequence {
        let sieve = EratosthenesSieve::builder()
            .initial_size(16)
            .prime_cache_len(3)
            .build();
        PrimeSequence::with_sieve(Arc::new(sieve))
    }

    #[test]
    fn cursor_crosses_sieve_growth() {
        let primes = small_sequence();
        let walked: Vec<usize> = primes.cursor().take(30).collect();
        assert_eq!(walked.len(), 30);
        assert_eq!(walked[29], 113);
        assert!(primes.sieve().capacity() > 113);
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cursor_from_runs_both_ways() {
        let primes = small_sequence();
        let mut cursor = primes.cursor_from(10).unwrap();
        assert_eq!(cursor.next_element().unwrap(), 31);
        assert_eq!(cursor.next_element().unwrap(), 37);
        assert_eq!(cursor.previous().unwrap(), 37);
        assert_eq!(cursor.previous().unwrap(), 31);
        assert_eq!(cursor.previous().unwrap(), 29);

        while cursor.has_previous() {
            cursor.previous().unwrap();
        }
        assert_eq!(cursor.next_element().unwrap(), 2);
    }

    #[test]
    fn sub_list_and_lookups() {
        let primes = small_sequence();
        let list = primes.sub_list(3, 8).unwrap();
        assert_eq!(&list[..], &[7, 11, 13, 17, 19]);
        assert_eq!(list.catalog_id(), "A000040");
        assert!(list.is_unique());

        assert_eq!(primes.index_of(19), Some(7));
        assert_eq!(primes.index_of(21), None);
        assert!(primes.contains(2));
        assert!(!primes.contains(1));
        assert_eq!(primes.size(), None);
    }
}
