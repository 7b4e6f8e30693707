//! Cache Entry Module
//!
//! Defines the structure for individual TTL cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value together with the moment it was written and its TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub data: V,
    /// Monotonic write time, used for all age calculations
    pub stored_at: Instant,
    /// Time-to-live
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    // == Is Valid ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals its TTL is still valid;
    /// it becomes invalid only once the age strictly exceeds the TTL.
    pub fn is_valid(&self) -> bool {
        self.age() <= self.ttl
    }

    // == Is Stale ==
    /// Returns true once the entry is older than `stale_time`.
    ///
    /// A stale entry may still be valid; stale-while-revalidate serves it and
    /// refreshes in the background.
    pub fn is_stale(&self, stale_time: Duration) -> bool {
        self.age() > stale_time
    }

    // == Time To Live ==
    /// Remaining lifetime, saturating at zero.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_is_valid() {
        let entry = CacheEntry::new("payload", Duration::from_secs(60));

        assert_eq!(entry.data, "payload");
        assert!(entry.is_valid());
        assert!(!entry.is_stale(Duration::from_secs(48)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new("payload", Duration::from_secs(1));

        tokio::time::advance(Duration::from_millis(1001)).await;

        assert!(!entry.is_valid());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("payload", Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;

        // age == ttl is still servable
        assert!(entry.is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_stale_but_valid() {
        let entry = CacheEntry::new("payload", Duration::from_secs(10));

        tokio::time::advance(Duration::from_secs(9)).await;

        assert!(entry.is_valid());
        assert!(entry.is_stale(Duration::from_secs(8)));
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(1));
    }
}
