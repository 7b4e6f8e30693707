//! Cache Manager Module
//!
//! Composes the TTL store with in-flight request tracking. Every miss goes
//! through a single spawned fetch per key; concurrent callers for that key
//! await the same shared outcome.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{try_join_all, BoxFuture, Shared};
use futures::FutureExt;
use regex::Regex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, StoreSnapshot, TtlStore, DEFAULT_STALE_RATIO};
use crate::error::{CacheError, Result};

/// Boxed zero-argument fetcher, used where fetchers of different concrete
/// types must share one collection.
pub type BoxedFetcher<V> = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<V>> + Send>;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V>>>;

// == Fetch Origin ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchOrigin {
    /// A caller is waiting on the result
    Demand,
    /// Stale-while-revalidate refresh nobody awaits
    Revalidation,
}

// == Pending Fetch ==
struct PendingFetch<V> {
    generation: u64,
    outcome: SharedFetch<V>,
}

struct Inner<V> {
    store: TtlStore<V>,
    pending: HashMap<String, PendingFetch<V>>,
    next_generation: u64,
}

// == Batch Request ==
/// One entry of a [`CacheManager::batch_requests`] fan-out.
pub struct BatchRequest<V> {
    pub key: String,
    pub ttl: Duration,
    fetcher: BoxedFetcher<V>,
}

impl<V: 'static> BatchRequest<V> {
    pub fn new<F, Fut>(key: impl Into<String>, ttl: Duration, fetcher: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        Self {
            key: key.into(),
            ttl,
            fetcher: Box::new(move || fetcher().boxed()),
        }
    }
}

/// Default stale threshold for stale-while-revalidate: 80% of the TTL.
pub fn default_stale_time(ttl: Duration) -> Duration {
    ttl.mul_f64(DEFAULT_STALE_RATIO)
}

// == Cache Manager ==
/// TTL cache with request coalescing and stale-while-revalidate.
///
/// Cloning is cheap and every clone shares the same store, so one instance is
/// built by the hosting process and handed to whoever needs it.
///
/// Fetches run on spawned tokio tasks: a caller that stops awaiting does not
/// cancel the fetch, and its result still lands in the cache.
pub struct CacheManager<V> {
    inner: Arc<Mutex<Inner<V>>>,
}

impl<V> Clone for CacheManager<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for CacheManager<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                store: TtlStore::default(),
                pending: HashMap::new(),
                next_generation: 0,
            })),
        }
    }
}

impl<V> CacheManager<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // Critical sections never panic mid-update, so a poisoned lock still holds consistent data
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns the cached value if it is still within its TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().store.get(key)
    }

    // == Set ==
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.lock().store.set(key, value, ttl);
    }

    // == Get Or Fetch ==
    /// Serves `key` from cache, or fetches it exactly once no matter how many
    /// callers ask concurrently.
    ///
    /// A failed fetch caches nothing and hands the same error to every caller
    /// that joined it; the next call starts over.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetcher: F, ttl: Duration) -> Result<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let outcome = {
            let mut inner = self.lock();
            if let Some(value) = inner.store.get(key) {
                debug!("Cache hit for {}", key);
                return Ok(value);
            }
            self.join_or_start(&mut inner, key, fetcher, ttl)
        };

        outcome.await
    }

    // == Join Or Start ==
    /// Miss path shared by every entry point: join the fetch in flight for
    /// `key`, or start one. The caller has already done (and counted) the
    /// store lookup and still holds the lock.
    fn join_or_start<F, Fut>(
        &self,
        inner: &mut Inner<V>,
        key: &str,
        fetcher: F,
        ttl: Duration,
    ) -> SharedFetch<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let in_flight = inner.pending.get(key).map(|pending| pending.outcome.clone());
        match in_flight {
            Some(outcome) => {
                inner.store.stats_mut().record_coalesced();
                debug!("Joining in-flight fetch for {}", key);
                outcome
            }
            None => {
                debug!("Cache miss for {}, fetching", key);
                self.start_fetch(inner, key, fetcher, ttl, FetchOrigin::Demand)
            }
        }
    }

    // == Stale While Revalidate ==
    /// Serves any valid cached value immediately, refreshing it in the
    /// background once it is older than `stale_time` (default 80% of `ttl`).
    ///
    /// Staleness is measured from the entry's own write time. Background
    /// failures are logged and leave the cached value in place. With nothing
    /// cached this behaves like a [`CacheManager::get_or_fetch`] miss, decided
    /// under the same lock as the lookup.
    pub async fn stale_while_revalidate<F, Fut>(
        &self,
        key: &str,
        fetcher: F,
        ttl: Duration,
        stale_time: Option<Duration>,
    ) -> Result<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let stale_time = stale_time.unwrap_or_else(|| default_stale_time(ttl));

        let outcome = {
            let mut inner = self.lock();
            let cached = inner
                .store
                .get_entry(key)
                .map(|entry| (entry.data.clone(), entry.is_stale(stale_time)));

            if let Some((value, stale)) = cached {
                if stale {
                    if inner.pending.contains_key(key) {
                        debug!("Refresh already in flight for stale entry {}", key);
                    } else {
                        debug!("Serving stale entry {} while revalidating", key);
                        inner.store.stats_mut().record_revalidation();
                        // The spawned task owns the refresh; nobody awaits it
                        let _ = self.start_fetch(
                            &mut inner,
                            key,
                            fetcher,
                            ttl,
                            FetchOrigin::Revalidation,
                        );
                    }
                }
                return Ok(value);
            }
            self.join_or_start(&mut inner, key, fetcher, ttl)
        };

        outcome.await
    }

    // == Batch Requests ==
    /// Runs [`CacheManager::get_or_fetch`] for every request concurrently.
    ///
    /// Results keep the input order. The first failure fails the whole batch;
    /// fetches already started still finish and populate the cache.
    pub async fn batch_requests(&self, requests: Vec<BatchRequest<V>>) -> Result<Vec<V>> {
        try_join_all(requests.into_iter().map(|request| {
            let BatchRequest { key, ttl, fetcher } = request;
            async move { self.get_or_fetch(&key, fetcher, ttl).await }
        }))
        .await
    }

    // == Prefetch ==
    /// Warms the cache with a batch. Failures are logged, never returned.
    pub async fn prefetch(&self, requests: Vec<BatchRequest<V>>) {
        let started = Instant::now();
        let count = requests.len();

        match self.batch_requests(requests).await {
            Ok(_) => info!(
                "Prefetched {} entries in {}ms",
                count,
                started.elapsed().as_millis()
            ),
            Err(err) => error!("Prefetch failed: {}", err),
        }
    }

    // == Invalidate ==
    /// Removes every cached key matching the regular expression `pattern`.
    ///
    /// Pattern syntax is that of the `regex` crate; an invalid pattern is
    /// returned as [`CacheError::InvalidPattern`] and removes nothing.
    pub fn invalidate(&self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern)?;
        let removed = self.lock().store.invalidate(&regex);
        info!("Invalidated {} entries matching {}", removed, pattern);
        Ok(removed)
    }

    // == Clear ==
    /// Drops all entries and forgets in-flight fetches.
    ///
    /// Fetches already running still complete and write their result.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.store.clear();
        inner.pending.clear();
        info!("Cache cleared");
    }

    // == Stats ==
    /// Keys currently stored. No side effects.
    pub fn stats(&self) -> StoreSnapshot {
        self.lock().store.snapshot()
    }

    pub fn counters(&self) -> CacheStats {
        self.lock().store.stats().clone()
    }

    /// Number of keys with a fetch in flight.
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    // == Start Fetch ==
    /// Spawns the fetch and registers it as pending. Must be called with the
    /// lock held so registration and the miss check are atomic.
    fn start_fetch<F, Fut>(
        &self,
        inner: &mut Inner<V>,
        key: &str,
        fetcher: F,
        ttl: Duration,
        origin: FetchOrigin,
    ) -> SharedFetch<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        inner.next_generation += 1;
        let generation = inner.next_generation;
        inner.store.stats_mut().record_fetch();

        let manager = self.clone();
        let task_key = key.to_string();
        let handle = tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(async move { fetcher().await })
                .catch_unwind()
                .await
            {
                Ok(result) => result.map_err(|err| CacheError::fetch(task_key.as_str(), err)),
                Err(_) => Err(CacheError::TaskFailed {
                    key: task_key.clone(),
                    message: "fetcher panicked".to_string(),
                }),
            };
            manager.settle(&task_key, generation, outcome, ttl, origin)
        });

        let join_key = key.to_string();
        let outcome = async move {
            handle.await.unwrap_or_else(|err| {
                Err(CacheError::TaskFailed {
                    key: join_key,
                    message: err.to_string(),
                })
            })
        }
        .boxed()
        .shared();

        inner.pending.insert(
            key.to_string(),
            PendingFetch {
                generation,
                outcome: outcome.clone(),
            },
        );
        outcome
    }

    // == Settle ==
    /// Records a finished fetch: stores the value on success and drops the
    /// pending marker either way.
    fn settle(
        &self,
        key: &str,
        generation: u64,
        outcome: Result<V>,
        ttl: Duration,
        origin: FetchOrigin,
    ) -> Result<V> {
        let mut inner = self.lock();

        // A fetch that outlived clear() must not unregister a newer one
        if inner
            .pending
            .get(key)
            .is_some_and(|pending| pending.generation == generation)
        {
            inner.pending.remove(key);
        }

        match &outcome {
            Ok(value) => {
                inner.store.set(key, value.clone(), ttl);
                debug!("Stored {} for {}s", key, ttl.as_secs());
            }
            Err(err) => {
                inner.store.stats_mut().record_fetch_failure();
                match origin {
                    FetchOrigin::Demand => debug!("Fetch for {} failed: {}", key, err),
                    FetchOrigin::Revalidation => {
                        warn!("Background revalidation error for {}: {}", key, err)
                    }
                }
            }
        }

        outcome
    }
}
