//! API Module
//!
//! HTTP handlers and routing for the cache host.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key` - TTL cache access
//! - `DELETE /invalidate?pattern=`, `DELETE /clear` - Cache busting
//! - `PUT /component`, `GET /component/:key` - Component LRU cache
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
