//! Prime factorizations and the arithmetic functions derived from them.

use std::collections::BTreeMap;
use std::fmt;

/// Prime factorization `n = Π pᵢ^kᵢ`, primes in increasing order.
///
/// Produced by [`EratosthenesSieve::factorize`](crate::sieve::EratosthenesSieve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorization {
    n: usize,
    factors: BTreeMap<usize, u32>,
}

impl Factorization {
    pub(crate) fn from_factors(n: usize, factors: BTreeMap<usize, u32>) -> Self {
        debug_assert_eq!(
            factors
                .iter()
                .map(|(&p, &k)| (p as u128).pow(k))
                .product::<u128>(),
            n as u128,
            "factors must multiply back to n"
        );
        Self { n, factors }
    }

    /// The factorized value.
    #[inline]
    pub fn value(&self) -> usize {
        self.n
    }

    /// Returns `true` for the factorization of 1.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Exponent of `p`, or 0 if `p` does not divide the value.
    pub fn exponent(&self, p: usize) -> u32 {
        self.factors.get(&p).copied().unwrap_or(0)
    }

    /// `(prime, exponent)` pairs in increasing prime order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.factors.iter().map(|(&p, &k)| (p, k))
    }

    /// Distinct prime factors, ω(n).
    pub fn omega(&self) -> usize {
        self.factors.len()
    }

    /// Prime factors counted with multiplicity, Ω(n).
    pub fn big_omega(&self) -> u32 {
        self.factors.values().sum()
    }

    /// Returns `true` if the value is prime.
    pub fn is_prime(&self) -> bool {
        self.big_omega() == 1
    }

    /// Returns `true` if no prime divides the value twice.
    pub fn is_squarefree(&self) -> bool {
        self.factors.values().all(|&k| k == 1)
    }

    /// Euler's totient φ(n).
    pub fn totient(&self) -> usize {
        self.iter()
            .map(|(p, k)| p.pow(k - 1) * (p - 1))
            .product()
    }

    /// Number of divisors τ(n).
    pub fn divisor_count(&self) -> u64 {
        self.factors.values().map(|&k| u64::from(k) + 1).product()
    }

    /// Sum of divisors σ(n).
    pub fn sigma(&self) -> u128 {
        self.iter()
            .map(|(p, k)| {
                let p = p as u128;
                (p.pow(k + 1) - 1) / (p - 1)
            })
            .product()
    }

    /// Sum of proper divisors, σ(n) − n.
    pub fn aliquot_sum(&self) -> u128 {
        self.sigma() - self.n as u128
    }
}

/// Formats as `p^k` terms joined by `", "`, e.g. `2^2, 3` for 12; 1 formats
/// as `1`.
impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return f.write_str("1");
        }
        for (i, (p, k)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if k == 1 {
                write!(f, "{p}")?;
            } else {
                write!(f, "{p}^{k}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::{EratosthenesSieve, PrimeSieve};
    use proptest::prelude::*;

    fn factor(n: usize) -> Factorization {
        EratosthenesSieve::shared().factorize(n).unwrap()
    }

    #[test]
    fn arithmetic_functions_of_known_values() {
        assert_eq!(factor(6).sigma(), 12);
        assert_eq!(factor(28).aliquot_sum(), 28);
        assert_eq!(factor(220).aliquot_sum(), 284);
        assert_eq!(factor(284).aliquot_sum(), 220);
        assert_eq!(factor(36).divisor_count(), 9);
        assert_eq!(factor(36).omega(), 2);
        assert_eq!(factor(36).big_omega(), 4);
        assert_eq!(factor(1).totient(), 1);
        assert_eq!(factor(1).sigma(), 1);
        assert!(factor(30).is_squarefree());
        assert!(!factor(18).is_squarefree());
        assert_eq!(factor(18).exponent(3), 2);
        assert_eq!(factor(18).exponent(5), 0);
    }

    #[test]
    fn totient_of_prime_is_p_minus_one() {
        let sieve = EratosthenesSieve::shared();
        for p in sieve.primes().take(200) {
            let f = sieve.factorize(p).unwrap();
            assert!(f.is_prime());
            assert_eq!(f.totient(), p - 1);
        }
    }

    proptest! {
        /// Property: factors multiply back to n and are all prime
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_factors_multiply_back(n in 1usize..10_000) {
            let sieve = EratosthenesSieve::shared();
            let f = sieve.factorize(n).unwrap();

            let mut product = 1usize;
            for (p, k) in f.iter() {
                prop_assert!(sieve.is_prime(p));
                prop_assert!(k >= 1);
                product *= p.pow(k);
            }
            prop_assert_eq!(product, n);
            prop_assert_eq!(f.value(), n);
        }
    }
}
