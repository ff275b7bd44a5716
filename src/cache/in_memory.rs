//! # Two-Tier In-Memory Cache
//!
//! The default [`SequenceCache`] backing every recurrence.
//!
//! ## Architecture
//!
//! ```text
//!   InMemorySequenceCache<E>
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │ read_only: AtomicBool                                           │
//!   │                                                                 │
//!   │ inner: RwLock<Tiers<E>>                                         │
//!   │ ┌─────────────────────────────┐ ┌─────────────────────────────┐ │
//!   │ │ permanent: Vec<E>           │ │ dynamic: InsertionOrderMap  │ │
//!   │ │                             │ │          <usize, E>         │ │
//!   │ │ [a0][a1][a2] ... [a(P-1)]   │ │  oldest ─► ... ─► newest    │ │
//!   │ │ filled once by initialize() │ │  filled by put(), bounded   │ │
//!   │ └─────────────────────────────┘ └─────────────────────────────┘ │
//!   └─────────────────────────────────────────────────────────────────┘
//!
//!   get(n):  n < P  → permanent[n]
//!            else   → dynamic.get(n)       (miss → None)
//!   put(n):  read_only or n < P → ignored
//!            else → dynamic.insert(n)      (may evict oldest insert)
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!   uninitialized ──initialize()──► initialized ──set_read_only(true)──► read-only
//!                                        ▲                                  │
//!                                        └──────set_read_only(false)────────┘
//! ```
//!
//! `initialize` succeeds exactly once. `reset` empties the dynamic tier and
//! never touches the permanent one.
//!
//! ## Concurrency
//!
//! `get` takes the shared lock, `put`/`initialize`/`reset` the exclusive one.
//! The read-only flag is an atomic outside the lock so toggling it never
//! waits behind a writer.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ds::InsertionOrderMap;
use crate::error::SequenceError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::SequenceCache;

/// Default dynamic-tier capacity.
pub const DEFAULT_DYNAMIC_CAPACITY: usize = 1000;

struct Tiers<E> {
    permanent: Vec<E>,
    dynamic: InsertionOrderMap<usize, E>,
    initialized: bool,
}

/// Thread-safe two-tier cache: a permanent prefix and a bounded FIFO tier.
///
/// # Example
///
/// ```
/// use seqkit::prelude::*;
///
/// let cache = InMemorySequenceCache::new(2);
/// cache.initialize(vec![10u64, 11, 12]).unwrap();
///
/// cache.put(1, 99); // covered by the permanent tier, ignored
/// assert_eq!(cache.get(1), Some(11));
///
/// cache.put(20, 1);
/// cache.put(21, 2);
/// cache.put(22, 3); // evicts index 20
/// assert_eq!(cache.get(20), None);
/// assert_eq!(cache.get(22), Some(3));
/// ```
pub struct InMemorySequenceCache<E> {
    inner: RwLock<Tiers<E>>,
    read_only: AtomicBool,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<E> InMemorySequenceCache<E> {
    /// Creates an uninitialized cache whose dynamic tier holds `capacity`
    /// entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Tiers {
                permanent: Vec::new(),
                dynamic: InsertionOrderMap::new(capacity),
                initialized: false,
            }),
            read_only: AtomicBool::new(false),
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::new(),
        }
    }

    /// Capacity of the dynamic tier.
    pub fn capacity(&self) -> usize {
        self.inner.read().dynamic.capacity()
    }

    /// Number of entries currently in the dynamic tier.
    pub fn dynamic_len(&self) -> usize {
        self.inner.read().dynamic.len()
    }

    /// Returns a point-in-time copy of the cache counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let tiers = self.inner.read();
        self.metrics.snapshot_with(
            tiers.permanent.len(),
            tiers.dynamic.len(),
            tiers.dynamic.capacity(),
        )
    }
}

impl<E> Default for InMemorySequenceCache<E> {
    fn default() -> Self {
        Self::new(DEFAULT_DYNAMIC_CAPACITY)
    }
}

impl<E> SequenceCache<E> for InMemorySequenceCache<E>
where
    E: Clone + Send + Sync,
{
    #[inline]
    fn is_read_only(&self) -> bool {
        self.read_only.load(Ordering::Acquire)
    }

    #[inline]
    fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::Release);
    }

    fn is_initialized(&self) -> bool {
        self.inner.read().initialized
    }

    fn initialize(&self, values: Vec<E>) -> Result<(), SequenceError> {
        let mut tiers = self.inner.write();
        if tiers.initialized {
            return Err(SequenceError::AlreadyInitialized);
        }

        let len = values.len();
        tiers.permanent = values;
        tiers.initialized = true;
        // Indices now owned by the permanent tier must not linger below it.
        if (0..len).any(|n| tiers.dynamic.contains(&n)) {
            let kept: Vec<(usize, E)> = std::iter::from_fn(|| tiers.dynamic.pop_oldest())
                .filter(|(n, _)| *n >= len)
                .collect();
            for (n, v) in kept {
                tiers.dynamic.insert(n, v);
            }
        }

        tracing::debug!(permanent_len = len, "sequence cache initialized");
        Ok(())
    }

    fn get(&self, n: usize) -> Option<E> {
        let tiers = self.inner.read();
        if let Some(value) = tiers.permanent.get(n) {
            #[cfg(feature = "metrics")]
            self.metrics.record_permanent_hit();
            return Some(value.clone());
        }

        let found = tiers.dynamic.get(&n).cloned();

        #[cfg(feature = "metrics")]
        self.metrics.record_dynamic_lookup(found.is_some());

        found
    }

    fn put(&self, n: usize, value: E) {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if self.is_read_only() {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_rejected();
            return;
        }

        let mut tiers = self.inner.write();
        if n < tiers.permanent.len() {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_skipped_permanent();
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_stored(tiers.dynamic.contains(&n));

        if let Some((evicted, _)) = tiers.dynamic.insert(n, value) {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            tracing::trace!(index = evicted, "evicted from dynamic tier");
        }
    }

    fn reset(&self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_reset();

        self.inner.write().dynamic.clear();
    }

    fn permanent_len(&self) -> usize {
        self.inner.read().permanent.len()
    }
}

#[cfg(feature = "metrics")]
impl<E> MetricsSnapshotProvider<CacheMetricsSnapshot> for InMemorySequenceCache<E> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<E> std::fmt::Debug for InMemorySequenceCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tiers = self.inner.read();
        f.debug_struct("InMemorySequenceCache")
            .field("permanent_len", &tiers.permanent.len())
            .field("dynamic", &tiers.dynamic)
            .field("initialized", &tiers.initialized)
            .field("read_only", &self.read_only.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Lifecycle
    // ==============================================

    mod lifecycle {
        use super::*;

        #[test]
        fn starts_uninitialized_and_writable() {
            let cache: InMemorySequenceCache<u64> = InMemorySequenceCache::default();
            assert!(!cache.is_initialized());
            assert!(!cache.is_read_only());
            assert_eq!(cache.capacity(), DEFAULT_DYNAMIC_CAPACITY);
            assert_eq!(cache.permanent_len(), 0);
        }

        #[test]
        fn initialize_only_once() {
            let cache = InMemorySequenceCache::new(4);
            assert_eq!(cache.initialize(vec![1u64, 2, 3]), Ok(()));
            assert!(cache.is_initialized());
            assert_eq!(
                cache.initialize(vec![9]),
                Err(SequenceError::AlreadyInitialized)
            );
            assert_eq!(cache.get(0), Some(1));
            assert_eq!(cache.permanent_len(), 3);
        }

        #[test]
        fn initialize_from_takes_prefix() {
            let cache = InMemorySequenceCache::new(4);
            let mut source = (0u64..).map(|i| i * i);
            cache.initialize_from(&mut source, 5).unwrap();

            assert_eq!(cache.permanent_len(), 5);
            assert_eq!(cache.get(4), Some(16));
            assert_eq!(cache.get(5), None);
            assert_eq!(source.next(), Some(25));
        }

        #[test]
        fn initialize_from_leaves_source_alone_when_initialized() {
            let cache = InMemorySequenceCache::new(4);
            cache.initialize(vec![0u64]).unwrap();

            let mut source = 0u64..10;
            assert_eq!(
                cache.initialize_from(&mut source, 5),
                Err(SequenceError::AlreadyInitialized)
            );
            assert_eq!(source.next(), Some(0));
        }

        #[test]
        fn initialize_drops_dynamic_entries_it_covers() {
            let cache = InMemorySequenceCache::new(4);
            cache.put(1, 100u64);
            cache.put(7, 700);
            cache.initialize(vec![0, 1, 2]).unwrap();

            assert_eq!(cache.get(1), Some(1));
            assert_eq!(cache.get(7), Some(700));
            assert_eq!(cache.dynamic_len(), 1);
        }
    }

    // ==============================================
    // Tier Behavior
    // ==============================================

    mod tier_behavior {
        use super::*;

        #[test]
        fn miss_is_none() {
            let cache: InMemorySequenceCache<u64> = InMemorySequenceCache::new(4);
            assert_eq!(cache.get(0), None);
            assert_eq!(cache.get(usize::MAX), None);
        }

        #[test]
        fn put_below_permanent_len_is_ignored() {
            let cache = InMemorySequenceCache::new(4);
            cache.initialize(vec![5u64, 6]).unwrap();
            cache.put(0, 50);
            cache.put(1, 60);

            assert_eq!(cache.get(0), Some(5));
            assert_eq!(cache.get(1), Some(6));
            assert_eq!(cache.dynamic_len(), 0);
        }

        #[test]
        fn dynamic_tier_evicts_oldest_insert() {
            let cache = InMemorySequenceCache::new(3);
            for n in 10..13 {
                cache.put(n, n as u64);
            }
            for _ in 0..10 {
                assert_eq!(cache.get(10), Some(10));
            }

            cache.put(13, 13);
            assert_eq!(cache.get(10), None, "reads never refresh an entry");
            assert_eq!(cache.get(11), Some(11));
            assert_eq!(cache.get(13), Some(13));
            assert_eq!(cache.dynamic_len(), 3);
        }

        #[test]
        fn eviction_churn_leaves_prefix_intact() {
            let cache = InMemorySequenceCache::new(4);
            cache.initialize((0..10u64).collect()).unwrap();
            for n in 10..100 {
                cache.put(n, n as u64);
            }

            for n in 0..10 {
                assert_eq!(cache.get(n), Some(n as u64), "prefix entry {n}");
            }
            assert_eq!(cache.permanent_len(), 10);
            assert_eq!(cache.dynamic_len(), 4);
            assert_eq!(cache.get(10), None);
            assert_eq!(cache.get(95), None);
            for n in 96..100 {
                assert_eq!(cache.get(n), Some(n as u64));
            }
        }

        #[test]
        fn read_only_ignores_puts() {
            let cache = InMemorySequenceCache::new(3);
            cache.put(10, 1u64);
            cache.set_read_only(true);
            cache.put(11, 2);
            cache.put(10, 3);

            assert_eq!(cache.get(10), Some(1));
            assert_eq!(cache.get(11), None);

            cache.set_read_only(false);
            cache.put(11, 2);
            assert_eq!(cache.get(11), Some(2));
        }

        #[test]
        fn reset_keeps_permanent_tier() {
            let cache = InMemorySequenceCache::new(3);
            cache.initialize(vec![1u64, 1, 2]).unwrap();
            cache.put(40, 4);
            cache.reset();

            assert_eq!(cache.get(40), None);
            assert_eq!(cache.get(2), Some(2));
            assert!(cache.is_initialized());
        }
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_hits_misses_and_evictions() {
            let cache = InMemorySequenceCache::new(1);
            cache.initialize(vec![0u64]).unwrap();
            cache.get(0);
            cache.get(5);
            cache.put(5, 5);
            cache.put(6, 6);
            cache.get(6);
            cache.set_read_only(true);
            cache.put(7, 7);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.permanent_hits, 1);
            assert_eq!(snap.dynamic_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.put_calls, 3);
            assert_eq!(snap.put_new, 2);
            assert_eq!(snap.put_rejected_read_only, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.dynamic_len, 1);
        }
    }
}
