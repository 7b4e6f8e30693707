//! Configuration Module
//!
//! Loads cache host configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{ttl, DEFAULT_COMPONENT_CACHE_SIZE};

/// Host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the component LRU cache
    pub component_cache_size: usize,
    /// TTL in seconds for `PUT /set` requests that do not carry one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `COMPONENT_CACHE_SIZE` - Component LRU capacity (default: 50)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            component_cache_size: env_or("COMPONENT_CACHE_SIZE", defaults.component_cache_size),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            component_cache_size: DEFAULT_COMPONENT_CACHE_SIZE,
            default_ttl: ttl::MOVIE.as_secs(),
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.component_cache_size, 50);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("COMPONENT_CACHE_SIZE");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.component_cache_size, 50);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_env_or_ignores_unparseable_values() {
        env::set_var("REEL_CACHE_TEST_PORT", "not-a-port");
        assert_eq!(env_or("REEL_CACHE_TEST_PORT", 3000u16), 3000);

        env::set_var("REEL_CACHE_TEST_PORT", "8080");
        assert_eq!(env_or("REEL_CACHE_TEST_PORT", 3000u16), 8080);
        env::remove_var("REEL_CACHE_TEST_PORT");
    }
}
