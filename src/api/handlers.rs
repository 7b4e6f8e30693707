//! API Handlers
//!
//! HTTP request handlers for the cache host's admin and introspection endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheManager, LruCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, ComponentSetRequest, DeleteResponse, GetResponse, HealthResponse, InvalidateQuery,
    InvalidateResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Owns the one TTL cache and the one component cache of this process; route
/// handlers and background jobs receive clones of this state.
#[derive(Clone)]
pub struct AppState {
    /// Response cache with request coalescing
    pub cache: CacheManager<Value>,
    /// Component-level object cache
    pub components: Arc<RwLock<LruCache<Value>>>,
    /// TTL applied to `PUT /set` requests without one
    pub default_ttl: Duration,
}

impl AppState {
    pub fn new(cache: CacheManager<Value>, components: LruCache<Value>, default_ttl: Duration) -> Self {
        Self {
            cache,
            components: Arc::new(RwLock::new(components)),
            default_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CacheManager::new(),
            LruCache::new(config.component_cache_size),
            config.default_ttl(),
        )
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs).unwrap_or(state.default_ttl);
    state.cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /invalidate?pattern=...
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(query): Query<InvalidateQuery>,
) -> Result<Json<InvalidateResponse>> {
    let removed = state.cache.invalidate(&query.pattern)?;

    Ok(Json(InvalidateResponse {
        pattern: query.pattern,
        removed,
    }))
}

/// Handler for DELETE /clear
///
/// Clears the TTL cache and the component cache.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear();
    state.components.write().await.clear();
    info!("Component cache cleared");

    Json(ClearResponse::cleared())
}

/// Handler for PUT /component
pub async fn component_set_handler(
    State(state): State<AppState>,
    Json(req): Json<ComponentSetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut components = state.components.write().await;
    components.set(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /component/:key
pub async fn component_get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a read refreshes the entry's access time
    let mut components = state.components.write().await;
    let value = components
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /component/:key
pub async fn component_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut components = state.components.write().await;
    components
        .remove(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let components = state.components.read().await.stats();

    Json(StatsResponse::new(
        state.cache.stats(),
        state.cache.counters(),
        state.cache.pending_count(),
        components,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
