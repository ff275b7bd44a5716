// ==============================================
// SIEVE CONSISTENCY TESTS (integration)
// ==============================================
//
// The Atkin and Eratosthenes sieves must answer every query identically,
// whatever their starting size and however often they have grown.

use seqkit::prelude::*;
use seqkit::sieve::{AtkinGrid, FactorGrid, PrimeSieve, Sieve, SieveGrid};

const LIMIT: usize = 200_000;

fn tiny<G: SieveGrid>() -> Sieve<G> {
    Sieve::builder().initial_size(8).prime_cache_len(4).build()
}

mod agreement {
    use super::*;

    #[test]
    fn primality_agrees_up_to_limit() {
        let atkin = AtkinSieve::new();
        let eratosthenes = EratosthenesSieve::new();
        for n in 0..LIMIT {
            assert_eq!(atkin.is_prime(n), eratosthenes.is_prime(n), "n = {n}");
        }
    }

    #[test]
    fn grown_sieves_agree_with_presized_ones() {
        let grown = tiny::<AtkinGrid>();
        let presized = EratosthenesSieve::builder()
            .initial_size(LIMIT)
            .prime_cache_len(0)
            .build();

        // Query from the top first so the small sieve grows in one jump.
        assert_eq!(grown.is_prime(LIMIT - 1), presized.is_prime(LIMIT - 1));
        for n in (0..LIMIT).step_by(7) {
            assert_eq!(grown.is_prime(n), presized.is_prime(n), "n = {n}");
        }
    }

    #[test]
    fn nth_prime_and_index_of_are_inverse() {
        let atkin = tiny::<AtkinGrid>();
        let eratosthenes = tiny::<FactorGrid>();
        for (i, p) in atkin.primes().take(2_000).enumerate() {
            assert_eq!(eratosthenes.nth_prime(i), p);
            assert_eq!(eratosthenes.index_of(p), Some(i));
            assert_eq!(atkin.index_of(p), Some(i));
        }
        assert_eq!(atkin.nth_prime(9_999), 104_729);
    }

    #[test]
    fn neighbours_agree() {
        let atkin = tiny::<AtkinGrid>();
        let eratosthenes = tiny::<FactorGrid>();
        for n in (0..20_000).step_by(13) {
            assert_eq!(atkin.next_prime_after(n), eratosthenes.next_prime_after(n));
            assert_eq!(
                atkin.previous_prime_before(n),
                eratosthenes.previous_prime_before(n)
            );
        }
    }
}

mod factorization {
    use super::*;

    #[test]
    fn factors_are_prime_and_multiply_back() {
        let sieve = EratosthenesSieve::shared();
        let atkin = AtkinSieve::shared();
        for n in (1..LIMIT).step_by(97) {
            let f = sieve.factorize(n).unwrap();
            let product: usize = f.iter().map(|(p, e)| p.pow(e)).product();
            assert_eq!(product, n);
            assert!(f.iter().all(|(p, _)| atkin.is_prime(p)), "{n} = {f}");
        }
    }

    #[test]
    fn primes_factor_as_themselves() {
        let sieve = EratosthenesSieve::shared();
        for p in PrimeSequence::new().cursor().take(500) {
            let f = sieve.factorize(p).unwrap();
            assert!(f.is_prime());
            assert_eq!(f.totient(), p - 1);
        }
    }
}
