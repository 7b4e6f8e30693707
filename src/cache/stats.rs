//! Cache Statistics Module
//!
//! Tracks lookups, fetches and request coalescing for the TTL cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters for the TTL store and the fetch layer on top of it.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a valid entry
    pub hits: u64,
    /// Lookups that found nothing valid
    pub misses: u64,
    /// Entries removed because a read found them expired
    pub expired: u64,
    /// Underlying fetches started (demand and background)
    pub fetches: u64,
    /// Callers that joined a fetch already in flight
    pub coalesced: u64,
    /// Fetches that settled with an error
    pub fetch_failures: u64,
    /// Background stale-while-revalidate refreshes started
    pub revalidations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    pub fn record_revalidation(&mut self) {
        self.revalidations += 1;
    }
}
