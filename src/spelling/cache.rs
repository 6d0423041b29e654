//! Bounded least-recently-used cache for candidate sets.

use std::collections::BTreeMap;
use std::hash::Hash;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    tick: u64,
}

/// A capacity-limited map that evicts the least recently used entry.
///
/// Recency is tracked with a monotonically increasing tick; `order` maps each
/// live tick back to its key so the oldest entry is found in `O(log n)`.
/// A capacity of zero disables caching entirely.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: AHashMap<K, Slot<V>>,
    order: BTreeMap<u64, K>,
    next_tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        LruCache {
            capacity,
            entries: AHashMap::new(),
            order: BTreeMap::new(),
            next_tick: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a key, marking it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let tick = self.bump_tick();
        match self.entries.get_mut(key) {
            Some(slot) => {
                self.order.remove(&slot.tick);
                self.order.insert(tick, key.clone());
                slot.tick = tick;
                self.hits += 1;
                Some(&slot.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a value, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let tick = self.bump_tick();
        if let Some(slot) = self.entries.get_mut(&key) {
            self.order.remove(&slot.tick);
            slot.value = value;
            slot.tick = tick;
            self.order.insert(tick, key);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_first() {
                Some((_, oldest)) => {
                    self.entries.remove(&oldest);
                    self.evictions += 1;
                }
                None => break,
            }
        }

        self.order.insert(tick, key.clone());
        self.entries.insert(key, Slot { value, tick });
    }

    /// Check membership without touching recency or statistics.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    fn bump_tick(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }
}

/// Statistics about the candidate cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_insert() {
        let mut cache = LruCache::new(2);
        assert!(cache.is_empty());

        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        assert_eq!(cache.get(&"a".to_string()), Some(&1));
        assert_eq!(cache.get(&"b".to_string()), Some(&2));
        assert_eq!(cache.get(&"c".to_string()), None);
        assert_eq!(cache.len(), 2);

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // Touch "a" so "b" becomes the oldest entry.
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reinsert_updates_value_without_eviction() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.stats().evictions, 0);

        // "b" is now the oldest.
        cache.insert("c", 3);
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let mut cache = LruCache::new(0);
        cache.insert("a", 1);

        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut cache = LruCache::new(3);
        for i in 0..100 {
            cache.insert(i, i * 2);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.get(&99), Some(&198));
        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.stats().evictions, 97);

        cache.clear();
        assert!(cache.is_empty());
    }
}
