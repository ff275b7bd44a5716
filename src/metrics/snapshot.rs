#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub permanent_hits: u64,
    pub dynamic_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_new: u64,
    pub put_updates: u64,
    pub put_rejected_read_only: u64,
    pub put_skipped_permanent: u64, // index already covered by the permanent tier

    pub evicted_entries: u64,
    pub resets: u64,

    // gauges captured at snapshot time
    pub permanent_len: usize,
    pub dynamic_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Hits from either tier.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.permanent_hits + self.dynamic_hits
    }

    /// Fraction of `get` calls that hit, or `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.hits() as f64 / self.get_calls as f64
        }
    }
}
