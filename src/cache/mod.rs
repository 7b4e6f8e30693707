//! Cache Module
//!
//! In-memory response caching: a TTL store with request coalescing and
//! stale-while-revalidate on top, plus an independent LRU store for
//! component-level objects.

mod entry;
pub mod keys;
mod lru;
mod manager;
mod stats;
mod store;
pub mod ttl;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{LruCache, LruEntry, LruStats, DEFAULT_COMPONENT_CACHE_SIZE, DEFAULT_MAX_SIZE};
pub use manager::{default_stale_time, BatchRequest, BoxedFetcher, CacheManager};
pub use stats::CacheStats;
pub use store::{StoreSnapshot, TtlStore};

// == Public Constants ==
/// Fraction of the TTL after which stale-while-revalidate refreshes an entry.
pub const DEFAULT_STALE_RATIO: f64 = 0.8;

/// Maximum accepted key length in bytes for keys coming over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
