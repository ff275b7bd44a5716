pub use crate::builder::{RecurrenceKind, SequenceBuilder};
pub use crate::cache::{InMemorySequenceCache, NullSequenceCache};
pub use crate::cursor::{LinearStep, ListCursor, SequenceCursor, SliceStep, Step};
pub use crate::error::{ConfigError, InvariantError, SequenceError};
pub use crate::figurate::PolygonalNumber;
pub use crate::list::SequenceList;
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::prime::PrimeSequence;
pub use crate::recurrence::{
    FactorialNumber, FibonacciNumber, LucasNumber, PadovanSequence, PellNumber, PerrinSequence,
};
pub use crate::sieve::{AtkinSieve, EratosthenesSieve, Factorization, PrimeSieve};
pub use crate::traits::{Sequence, SequenceCache};
