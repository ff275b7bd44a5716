//! Bounded map with insertion-order eviction.
//!
//! Backs the dynamic tier of [`InMemorySequenceCache`](crate::cache::InMemorySequenceCache).
//! Entries leave in the order they arrived; reads never refresh an entry.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, V>            order: VecDeque<K>
//!   ┌─────────┬───────┐             front                        back
//!   │  key 17 │  v17  │             [17] ─ [4] ─ [250] ─ [9]
//!   │  key 4  │  v4   │              ↑                      ↑
//!   │  key 250│  v250 │            oldest                 newest
//!   │  key 9  │  v9   │             EVICT
//!   └─────────┴───────┘
//! ```
//!
//! ## Behavior
//! - `insert(k, v)` on a new key pushes `k` to the back, then evicts from the
//!   front while `len > capacity`.
//! - `insert(k, v)` on an existing key replaces the value in place; the key
//!   keeps its original position.
//! - `get(k)` never reorders.
//!
//! ## Operations
//!
//! | Operation     | Time  | Notes                                  |
//! |---------------|-------|----------------------------------------|
//! | `get`         | O(1)  | HashMap lookup, no reordering          |
//! | `insert`      | O(1)* | *Amortized, may evict the oldest entry |
//! | `pop_oldest`  | O(1)  | Front of the order queue               |
//! | `age_rank`    | O(n)  | Linear scan of the order queue         |
//! | `clear`       | O(n)  |                                        |
//!
//! `validate_invariants()` runs in debug builds.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::hash::Hash;

/// Bounded key/value map that evicts the oldest inserted entry first.
///
/// # Example
///
/// ```
/// use seqkit::ds::InsertionOrderMap;
///
/// let mut map = InsertionOrderMap::new(2);
/// map.insert(1, "one");
/// map.insert(2, "two");
/// map.get(&1); // reads do not refresh
///
/// let evicted = map.insert(3, "three");
/// assert_eq!(evicted, Some((1, "one")));
/// assert!(!map.contains(&1));
/// ```
pub struct InsertionOrderMap<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> InsertionOrderMap<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty map holding at most `capacity` entries.
    ///
    /// A capacity of zero rejects every insertion.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        // Preallocation is capped so a huge nominal capacity stays lazy.
        let prealloc = capacity.min(4096);
        Self {
            map: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            order: VecDeque::with_capacity(prealloc),
            capacity,
        }
    }

    /// Returns the value for `key` without affecting eviction order.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts or updates `key`, returning the entry evicted to make room.
    ///
    /// At most one entry is evicted per call, since each call grows the map by
    /// at most one.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            return None;
        }

        self.order.push_back(key.clone());
        self.map.insert(key, value);

        let evicted = if self.map.len() > self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        evicted
    }

    /// Removes and returns the oldest inserted entry.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let value = self.map.remove(&key)?;
        Some((key, value))
    }

    /// Peeks at the oldest inserted entry.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.order.front()?;
        self.map.get(key).map(|v| (key, v))
    }

    /// Position of `key` in insertion order (0 = oldest).
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Validates internal data structure invariants.
    ///
    /// Checks that:
    /// - Map size matches queue size
    /// - Every queued key is in the map
    /// - The map never exceeds capacity
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        debug_assert_eq!(
            self.map.len(),
            self.order.len(),
            "Map and order queue have different sizes"
        );
        debug_assert!(self.map.len() <= self.capacity, "Map exceeds capacity");
        for key in &self.order {
            debug_assert!(self.map.contains_key(key), "Queued key not found in map");
        }
    }
}

impl<K, V> std::fmt::Debug for InsertionOrderMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertionOrderMap")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_map_is_empty() {
            let map: InsertionOrderMap<usize, u64> = InsertionOrderMap::new(10);
            assert!(map.is_empty());
            assert_eq!(map.len(), 0);
            assert_eq!(map.capacity(), 10);
        }

        #[test]
        fn insert_and_get() {
            let mut map = InsertionOrderMap::new(10);
            assert_eq!(map.insert(3, "three"), None);
            assert_eq!(map.get(&3), Some(&"three"));
            assert_eq!(map.get(&4), None);
        }

        #[test]
        fn update_keeps_position() {
            let mut map = InsertionOrderMap::new(3);
            map.insert(1, 10);
            map.insert(2, 20);
            map.insert(1, 100);

            assert_eq!(map.len(), 2);
            assert_eq!(map.get(&1), Some(&100));
            assert_eq!(map.age_rank(&1), Some(0));
        }

        #[test]
        fn clear_removes_everything() {
            let mut map = InsertionOrderMap::new(3);
            map.insert(1, 10);
            map.insert(2, 20);
            map.clear();

            assert!(map.is_empty());
            assert_eq!(map.peek_oldest(), None);
        }
    }

    // ==============================================
    // Eviction Behavior
    // ==============================================

    mod eviction_behavior {
        use super::*;

        #[test]
        fn evicts_oldest_inserted() {
            let mut map = InsertionOrderMap::new(3);
            map.insert("a", 1);
            map.insert("b", 2);
            map.insert("c", 3);

            assert_eq!(map.insert("d", 4), Some(("a", 1)));
            assert_eq!(map.len(), 3);
            assert!(!map.contains(&"a"));
            assert!(map.contains(&"d"));
        }

        #[test]
        fn reads_do_not_refresh() {
            let mut map = InsertionOrderMap::new(2);
            map.insert(1, 1);
            map.insert(2, 2);
            for _ in 0..100 {
                map.get(&1);
            }

            map.insert(3, 3);
            assert!(!map.contains(&1), "oldest insert evicted despite reads");
            assert!(map.contains(&2));
        }

        #[test]
        fn zero_capacity_rejects_inserts() {
            let mut map = InsertionOrderMap::new(0);
            assert_eq!(map.insert(1, 1), None);
            assert!(map.is_empty());
        }

        #[test]
        fn pop_oldest_drains_in_order() {
            let mut map = InsertionOrderMap::new(5);
            for i in 0..5 {
                map.insert(i, i * 10);
            }
            let drained: Vec<_> = std::iter::from_fn(|| map.pop_oldest()).collect();
            assert_eq!(drained, vec![(0, 0), (1, 10), (2, 20), (3, 30), (4, 40)]);
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: contents match a reference queue that drops its front
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_queue(
                capacity in 1usize..16,
                keys in prop::collection::vec(0usize..32, 0..80)
            ) {
                let mut map = InsertionOrderMap::new(capacity);
                let mut reference: VecDeque<usize> = VecDeque::new();

                for key in keys {
                    map.insert(key, key * 2);
                    if !reference.contains(&key) {
                        reference.push_back(key);
                        if reference.len() > capacity {
                            reference.pop_front();
                        }
                    }

                    prop_assert_eq!(map.len(), reference.len());
                    for (rank, k) in reference.iter().enumerate() {
                        prop_assert_eq!(map.age_rank(k), Some(rank));
                        prop_assert_eq!(map.get(k), Some(&(k * 2)));
                    }
                }
            }
        }
    }
}
