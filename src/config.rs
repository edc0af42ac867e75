//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime in seconds of the stored card
    pub card_ttl: u64,
    /// Upper bound in milliseconds on waiting for a per-key lock, 0 = unbounded
    pub lock_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CARD_TTL` - Card lifetime in seconds (default: 86400)
    /// - `LOCK_TIMEOUT_MS` - Lock wait bound in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            card_ttl: env_or("CARD_TTL", defaults.card_ttl),
            lock_timeout_ms: env_or("LOCK_TIMEOUT_MS", defaults.lock_timeout_ms),
        }
    }

    /// Card lifetime as a duration.
    pub fn card_ttl(&self) -> Duration {
        Duration::from_secs(self.card_ttl)
    }

    /// Builds the cache configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            lock_timeout: match self.lock_timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            card_ttl: 86_400,
            lock_timeout_ms: 5_000,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.card_ttl, 86_400);
        assert_eq!(config.lock_timeout_ms, 5_000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CARD_TTL");
        env::remove_var("LOCK_TIMEOUT_MS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.card_ttl, 86_400);
        assert_eq!(config.lock_timeout_ms, 5_000);
    }

    #[test]
    fn test_cache_config_lock_timeout() {
        let config = Config::default();
        assert_eq!(
            config.cache_config().lock_timeout,
            Some(Duration::from_millis(5_000))
        );

        let unbounded = Config {
            lock_timeout_ms: 0,
            ..Config::default()
        };
        assert_eq!(unbounded.cache_config().lock_timeout, None);
    }
}
