//! # Cache Metrics
//!
//! Optional counters for [`InMemorySequenceCache`](crate::cache::InMemorySequenceCache),
//! compiled only with the `metrics` feature.
//!
//! Recording and reading are split: the cache owns a [`CacheMetrics`] and bumps
//! its counters on the hot path; callers read a plain-data
//! [`CacheMetricsSnapshot`] through [`MetricsSnapshotProvider`].
//!
//! ```text
//!   InMemorySequenceCache ──record_*()──► CacheMetrics (AtomicU64 counters)
//!            │
//!            └──metrics_snapshot()──────► CacheMetricsSnapshot (Copy)
//! ```
//!
//! Counters use relaxed atomics. `get` runs under a shared lock, so several
//! readers may record at once; totals are exact but a snapshot taken during
//! concurrent traffic is not a consistent cut across counters.

mod snapshot;

pub use snapshot::CacheMetricsSnapshot;

use std::sync::atomic::{AtomicU64, Ordering};

/// Types that can produce a point-in-time metrics snapshot.
pub trait MetricsSnapshotProvider<S> {
    /// Returns the current counter values.
    fn snapshot(&self) -> S;
}

/// Live counters owned by a cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    get_calls: AtomicU64,
    permanent_hits: AtomicU64,
    dynamic_hits: AtomicU64,
    get_misses: AtomicU64,
    put_calls: AtomicU64,
    put_new: AtomicU64,
    put_updates: AtomicU64,
    put_rejected_read_only: AtomicU64,
    put_skipped_permanent: AtomicU64,
    evicted_entries: AtomicU64,
    resets: AtomicU64,
}

#[inline]
fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

#[inline]
fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_permanent_hit(&self) {
        bump(&self.get_calls);
        bump(&self.permanent_hits);
    }

    /// Records a lookup that fell through to the dynamic tier.
    #[inline]
    pub fn record_dynamic_lookup(&self, hit: bool) {
        bump(&self.get_calls);
        if hit {
            bump(&self.dynamic_hits);
        } else {
            bump(&self.get_misses);
        }
    }

    #[inline]
    pub fn record_put_call(&self) {
        bump(&self.put_calls);
    }

    /// Records a put that reached the dynamic tier.
    #[inline]
    pub fn record_put_stored(&self, existed: bool) {
        if existed {
            bump(&self.put_updates);
        } else {
            bump(&self.put_new);
        }
    }

    #[inline]
    pub fn record_put_rejected(&self) {
        bump(&self.put_rejected_read_only);
    }

    #[inline]
    pub fn record_put_skipped_permanent(&self) {
        bump(&self.put_skipped_permanent);
    }

    #[inline]
    pub fn record_eviction(&self) {
        bump(&self.evicted_entries);
    }

    #[inline]
    pub fn record_reset(&self) {
        bump(&self.resets);
    }

    /// Copies the counters, filling the gauges from the caller.
    pub fn snapshot_with(
        &self,
        permanent_len: usize,
        dynamic_len: usize,
        capacity: usize,
    ) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: read(&self.get_calls),
            permanent_hits: read(&self.permanent_hits),
            dynamic_hits: read(&self.dynamic_hits),
            get_misses: read(&self.get_misses),
            put_calls: read(&self.put_calls),
            put_new: read(&self.put_new),
            put_updates: read(&self.put_updates),
            put_rejected_read_only: read(&self.put_rejected_read_only),
            put_skipped_permanent: read(&self.put_skipped_permanent),
            evicted_entries: read(&self.evicted_entries),
            resets: read(&self.resets),
            permanent_len,
            dynamic_len,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let snap = CacheMetrics::new().snapshot_with(0, 0, 8);
        assert_eq!(snap.get_calls, 0);
        assert_eq!(snap.evicted_entries, 0);
        assert_eq!(snap.capacity, 8);
    }

    #[test]
    fn hits_and_misses_both_count_as_gets() {
        let metrics = CacheMetrics::new();
        metrics.record_permanent_hit();
        metrics.record_dynamic_lookup(true);
        metrics.record_dynamic_lookup(false);
        metrics.record_dynamic_lookup(false);

        let snap = metrics.snapshot_with(0, 0, 0);
        assert_eq!(snap.get_calls, 4);
        assert_eq!(snap.hits(), 2);
        assert_eq!(snap.get_misses, 2);
        assert!((snap.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
