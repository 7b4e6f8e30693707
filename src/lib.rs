//! Reel Cache - response caching for a movie discovery backend
//!
//! A TTL cache with request coalescing and stale-while-revalidate, an LRU
//! component cache, and the key registry both rely on.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{BatchRequest, CacheManager, LruCache};
pub use config::Config;
pub use error::{CacheError, Result};
