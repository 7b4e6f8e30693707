//! TTL Store Module
//!
//! Key-value storage with per-entry TTL and lazy expiration on read.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::cache::{CacheEntry, CacheStats};

// == Store Snapshot ==
/// Point-in-time view of the keys currently held by a [`TtlStore`].
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Number of stored entries, including ones that expired but were not read yet
    pub size: usize,
    /// Stored keys, sorted
    pub entries: Vec<String>,
}

// == TTL Store ==
/// Holds `(value, write time, ttl)` triples keyed by string.
///
/// There is no background sweeper: an expired entry is removed the first time
/// a read finds it.
#[derive(Debug)]
pub struct TtlStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

impl<V> Default for TtlStore<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }
}

impl<V: Clone> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store with zeroed counters.
    ///
    /// Entries carry their own TTL, so the store itself takes no capacity or
    /// default lifetime.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns a clone of the value if the entry is still valid.
    ///
    /// An expired entry is deleted as a side effect and counted as a miss.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_entry(key).map(|entry| entry.data.clone())
    }

    // == Get Entry ==
    /// Like [`TtlStore::get`], but exposes the entry so callers can inspect its age.
    ///
    /// Counts exactly one hit or one miss per call, plus one expiry when a
    /// stale entry is dropped.
    pub fn get_entry(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let valid = match self.entries.get(key) {
            Some(entry) => entry.is_valid(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !valid {
            self.entries.remove(key);
            self.stats.record_expired();
            self.stats.record_miss();
            trace!("Lazily expired cache entry {}", key);
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key)
    }
}

impl<V> TtlStore<V> {
    // == Set ==
    /// Stores a value with its own TTL.
    ///
    /// If the key already exists, the value is overwritten and its age starts
    /// again from zero.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - How long the value may be served
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    // == Invalidate ==
    /// Deletes every key matched by `pattern`, returning how many were removed.
    ///
    /// The pattern is unanchored: `movie` matches `movies-popular-1` as well
    /// as `movie-550`. Counters are left alone.
    ///
    /// # Arguments
    /// * `pattern` - Compiled regex tested against each key
    pub fn invalidate(&mut self, pattern: &Regex) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !pattern.is_match(key));
        before - self.entries.len()
    }

    // == Clear ==
    /// Removes every entry. Hit and miss counters keep their totals.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Snapshot ==
    /// Lists the stored keys without touching expiry or counters.
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut entries: Vec<String> = self.entries.keys().cloned().collect();
        entries.sort();
        StoreSnapshot {
            size: self.entries.len(),
            entries,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
