//! API Routes
//!
//! Configures the Axum router with all cache host endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, component_delete_handler, component_get_handler, component_set_handler, get_handler, health_handler,
    invalidate_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value with optional TTL
/// - `GET /get/:key` - Read a value if still within its TTL
/// - `DELETE /invalidate?pattern=` - Remove keys matching a regex
/// - `DELETE /clear` - Drop both caches
/// - `PUT /component`, `GET /component/:key`, `DELETE /component/:key` - Component LRU cache
/// - `GET /stats` - Store snapshot and counters
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/invalidate", delete(invalidate_handler))
        .route("/clear", delete(clear_handler))
        .route("/component", put(component_set_handler))
        .route(
            "/component/:key",
            get(component_get_handler).delete(component_delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
