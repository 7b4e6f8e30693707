//! Request DTOs for the cache host API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for `PUT /set`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    /// Any JSON payload
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ttl == Some(0) {
            return Some("TTL must be at least one second".to_string());
        }
        validate_key(&self.key)
    }
}

/// Request body for `PUT /component`
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSetRequest {
    pub key: String,
    pub value: Value,
}

impl ComponentSetRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Query string for `DELETE /invalidate`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateQuery {
    /// Regular expression matched against cache keys
    pub pattern: String,
}
