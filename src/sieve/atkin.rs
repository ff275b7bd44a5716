//! Sieve of Atkin over a packed bit grid.
//!
//! For `x, y` below `ceil(sqrt(size))` the quadratic forms toggle candidate
//! bits:
//!
//! | form          | condition          | toggled when      |
//! |---------------|--------------------|-------------------|
//! | `4x² + y²`    |                    | `n mod 12 ∈ {1,5}`|
//! | `3x² + y²`    |                    | `n mod 12 == 7`   |
//! | `3x² − y²`    | `x > y`            | `n mod 12 == 11`  |
//!
//! A bit toggled an odd number of times marks a squarefree prime candidate.
//! Multiples of `x²` for each surviving odd `x >= 5` are then cleared, and the
//! small cases the forms miss (1, 2, 3) are fixed by hand.

use std::sync::{Arc, OnceLock};

use super::{ceil_sqrt, Sieve, SieveGrid};
use crate::ds::BitSet;

/// Bit-per-integer primality grid built by the Sieve of Atkin.
#[derive(Clone)]
pub struct AtkinGrid {
    bits: BitSet,
}

/// Sieve backed by an [`AtkinGrid`].
pub type AtkinSieve = Sieve<AtkinGrid>;

impl SieveGrid for AtkinGrid {
    const NAME: &'static str = "atkin";

    fn build(size: usize) -> Self {
        let mut bits = BitSet::new(size);
        let limit = ceil_sqrt(size);

        for x in 0..limit {
            let x2 = x * x;
            for y in 0..limit {
                let y2 = y * y;

                let n = 4 * x2 + y2;
                if n < size && (n % 12 == 1 || n % 12 == 5) {
                    bits.flip(n);
                }

                let n = 3 * x2 + y2;
                if n < size && n % 12 == 7 {
                    bits.flip(n);
                }

                if x > y {
                    let n = 3 * x2 - y2;
                    if n < size && n % 12 == 11 {
                        bits.flip(n);
                    }
                }
            }
        }

        let mut x = 5;
        while x * x < size {
            if bits.get(x) {
                let step = x * x;
                for multiple in (step..size).step_by(step) {
                    bits.clear(multiple);
                }
            }
            x += 2;
        }

        if size > 1 {
            bits.clear(1);
        }
        for p in [2, 3] {
            if p < size {
                bits.set(p);
            }
        }

        Self { bits }
    }

    #[inline]
    fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    fn is_prime(&self, n: usize) -> bool {
        self.bits.get(n)
    }

    fn approx_bytes(&self) -> usize {
        self.bits.approx_bytes()
    }
}

impl Sieve<AtkinGrid> {
    /// Process-wide Atkin sieve, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<AtkinSieve>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }
}

impl std::fmt::Debug for AtkinGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtkinGrid")
            .field("len", &self.bits.len())
            .finish()
    }
}
