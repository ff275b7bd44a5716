//! Sieve of Eratosthenes recording each composite's smallest prime factor.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use super::{Factorization, Sieve, SieveGrid};
use crate::error::SequenceError;

/// Smallest-factor grid: slot `n` holds the smallest prime dividing `n` when
/// `n` is composite, and `0` when `n` is prime (or 0 or 1).
#[derive(Clone)]
pub struct FactorGrid {
    factors: Vec<u32>,
}

/// Sieve backed by a [`FactorGrid`]; adds [`factorize`](Sieve::factorize).
pub type EratosthenesSieve = Sieve<FactorGrid>;

impl FactorGrid {
    /// Smallest prime factor of `n`, which is `n` itself when `n` is prime.
    ///
    /// Only meaningful for `2 <= n < len()`.
    #[inline]
    fn smallest_factor(&self, n: usize) -> usize {
        match self.factors[n] {
            0 => n,
            f => f as usize,
        }
    }
}

impl SieveGrid for FactorGrid {
    const NAME: &'static str = "eratosthenes";

    fn build(size: usize) -> Self {
        let mut factors = vec![0u32; size];

        let mut x = 2usize;
        while x * x < size {
            if factors[x] == 0 {
                for multiple in (x * x..size).step_by(x) {
                    if factors[multiple] == 0 {
                        factors[multiple] = x as u32;
                    }
                }
            }
            x += 1;
        }

        Self { factors }
    }

    #[inline]
    fn len(&self) -> usize {
        self.factors.len()
    }

    #[inline]
    fn is_prime(&self, n: usize) -> bool {
        n >= 2 && self.factors[n] == 0
    }

    fn approx_bytes(&self) -> usize {
        self.factors.capacity() * std::mem::size_of::<u32>()
    }
}

impl Sieve<FactorGrid> {
    /// Process-wide Eratosthenes sieve, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<EratosthenesSieve>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Prime factorization of `n`, growing the grid to cover it.
    ///
    /// `factorize(1)` is the empty factorization.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] for `n == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use seqkit::sieve::EratosthenesSieve;
    ///
    /// let sieve = EratosthenesSieve::shared();
    /// let f = sieve.factorize(360).unwrap();
    /// assert_eq!(f.to_string(), "2^3, 3^2, 5");
    /// assert_eq!(f.totient(), 96);
    /// ```
    pub fn factorize(&self, n: usize) -> Result<Factorization, SequenceError> {
        if n == 0 {
            return Err(SequenceError::invalid("cannot factorize 0"));
        }

        self.ensure(n);
        let grid = self.grid.read();

        let mut factors = BTreeMap::new();
        let mut rest = n;
        while rest > 1 {
            let p = grid.smallest_factor(rest);
            *factors.entry(p).or_insert(0u32) += 1;
            rest /= p;
        }

        Ok(Factorization::from_factors(n, factors))
    }
}

impl std::fmt::Debug for FactorGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactorGrid")
            .field("len", &self.factors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::PrimeSieve;

    #[test]
    fn zero_and_one_are_not_prime() {
        let grid = FactorGrid::build(10);
        assert!(!grid.is_prime(0));
        assert!(!grid.is_prime(1));
        assert!(grid.is_prime(2));
        assert!(grid.is_prime(7));
        assert!(!grid.is_prime(9));
    }

    #[test]
    fn records_smallest_factor() {
        let grid = FactorGrid::build(100);
        assert_eq!(grid.smallest_factor(91), 7);
        assert_eq!(grid.smallest_factor(45), 3);
        assert_eq!(grid.smallest_factor(64), 2);
        assert_eq!(grid.smallest_factor(97), 97);
    }

    #[test]
    fn factorize_small_values() {
        let sieve = EratosthenesSieve::builder()
            .initial_size(32)
            .prime_cache_len(4)
            .build();

        assert!(matches!(
            sieve.factorize(0),
            Err(SequenceError::InvalidArgument(_))
        ));
        assert!(sieve.factorize(1).unwrap().is_empty());
        assert_eq!(sieve.factorize(12).unwrap().to_string(), "2^2, 3");
        assert_eq!(sieve.factorize(97).unwrap().to_string(), "97");
    }

    #[test]
    fn factorize_grows_grid() {
        let sieve = EratosthenesSieve::builder()
            .initial_size(32)
            .prime_cache_len(4)
            .build();
        let f = sieve.factorize(1_000_003 * 2).unwrap();
        assert_eq!(f.to_string(), "2, 1000003");
        assert!(sieve.capacity() > 2_000_006);
    }
}
