//! LRU Store Module
//!
//! Fixed-capacity object cache for component-level data, evicting the entry
//! with the oldest access. Independent of the TTL store: nothing here expires
//! by age.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

/// Capacity of an [`LruCache`] built with `Default`.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Capacity used for the shared component cache.
pub const DEFAULT_COMPONENT_CACHE_SIZE: usize = 50;

// == LRU Entry ==
#[derive(Debug, Clone)]
pub struct LruEntry<V> {
    pub data: V,
    /// Position in the access sequence; the smallest tick is evicted first
    pub access_tick: u64,
}

// == LRU Stats ==
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LruStats {
    pub size: usize,
    pub max_size: usize,
    pub evictions: u64,
}

// == LRU Cache ==
/// Capacity-bounded map ordered by last access.
///
/// `get` refreshes an entry's access tick; `set` evicts the least recently
/// accessed entry once the map grows past `max_size`. Eviction scans all
/// entries, which is fine at component-cache sizes.
#[derive(Debug)]
pub struct LruCache<V> {
    entries: HashMap<String, LruEntry<V>>,
    max_size: usize,
    clock: u64,
    evictions: u64,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// # Arguments
    /// * `max_size` - Entry count past which the least recently accessed entry is evicted
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            clock: 0,
            evictions: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    // == Set ==
    /// Inserts or replaces a value and marks it most recently used.
    ///
    /// Replacing an existing key never evicts. Inserting a new key into a full
    /// cache evicts exactly one entry, the one accessed longest ago.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `data` - The value to store
    pub fn set(&mut self, key: impl Into<String>, data: V) {
        let access_tick = self.tick();
        self.entries.insert(key.into(), LruEntry { data, access_tick });

        if self.entries.len() > self.max_size {
            self.evict_oldest();
        }
    }

    // == Evict Oldest ==
    fn evict_oldest(&mut self) -> Option<String> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_tick)
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&oldest);
        self.evictions += 1;
        trace!("Evicted least recently used component entry {}", oldest);
        Some(oldest)
    }

    // == Remove ==
    /// Removes a single key, returning its value if it was present.
    ///
    /// # Arguments
    /// * `key` - The key to remove
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.data)
    }

    // == Clear ==
    /// Removes every entry. Capacity and the eviction count are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    pub fn stats(&self) -> LruStats {
        LruStats {
            size: self.entries.len(),
            max_size: self.max_size,
            evictions: self.evictions,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<V: Clone> LruCache<V> {
    // == Get ==
    /// Returns the value and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let access_tick = self.tick();
        let entry = self.entries.get_mut(key)?;
        entry.access_tick = access_tick;
        Some(entry.data.clone())
    }
}

impl<V> Default for LruCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru: LruCache<u32> = LruCache::new(2);
        assert!(lru.is_empty());
        assert_eq!(
            lru.stats(),
            LruStats {
                size: 0,
                max_size: 2,
                evictions: 0
            }
        );
    }

    #[test]
    fn test_lru_default_capacity() {
        let lru: LruCache<u32> = LruCache::default();
        assert_eq!(lru.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(lru.max_size(), 100);
    }

    #[test]
    fn test_lru_get_refreshes_access() {
        let mut lru = LruCache::new(2);

        lru.set("a", 1);
        lru.set("b", 2);
        assert_eq!(lru.get("a"), Some(1));
        lru.set("c", 3);

        assert!(lru.contains("a"));
        assert!(!lru.contains("b"));
        assert!(lru.contains("c"));
        assert_eq!(lru.stats().evictions, 1);
    }

    #[test]
    fn test_lru_evicts_oldest_without_access() {
        let mut lru = LruCache::new(3);

        lru.set("key1", "value1");
        lru.set("key2", "value2");
        lru.set("key3", "value3");
        lru.set("key4", "value4");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.get("key1"), None);
        assert_eq!(lru.get("key4"), Some("value4"));
    }

    #[test]
    fn test_lru_replace_does_not_grow() {
        let mut lru = LruCache::new(2);

        lru.set("a", 1);
        lru.set("b", 2);
        lru.set("a", 10);

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.get("a"), Some(10));
        assert_eq!(lru.stats().evictions, 0);
    }

    #[test]
    fn test_lru_replace_refreshes_access() {
        let mut lru = LruCache::new(2);

        lru.set("a", 1);
        lru.set("b", 2);
        lru.set("a", 10);
        lru.set("c", 3);

        assert!(lru.contains("a"));
        assert!(!lru.contains("b"));
    }

    #[test]
    fn test_lru_get_miss() {
        let mut lru: LruCache<u32> = LruCache::new(2);
        assert_eq!(lru.get("missing"), None);
    }

    #[test]
    fn test_lru_remove_and_clear() {
        let mut lru = LruCache::new(4);

        lru.set("a", 1);
        lru.set("b", 2);

        assert_eq!(lru.remove("a"), Some(1));
        assert_eq!(lru.remove("a"), None);

        lru.clear();
        assert!(lru.is_empty());
        assert_eq!(lru.stats().max_size, 4);
    }
}
