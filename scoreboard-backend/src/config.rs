use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;

use crate::RateLimitConfig;

/// Application configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// Request body size limit in bytes
    /// Env: REQUEST_BODY_LIMIT (default: 65536 = 64KB)
    pub request_body_limit: usize,

    /// Request timeout in seconds
    /// Env: REQUEST_TIMEOUT_SECS (default: 30)
    pub request_timeout: Duration,

    /// Server port
    /// Env: PORT (default: 8080)
    pub port: u16,

    /// Whether per-IP rate limiting is applied to the player endpoints
    /// Env: RATE_LIMIT_ENABLED (default: true)
    pub rate_limit_enabled: bool,

    /// Rate limit for player endpoints (requests per second)
    /// Env: RATE_LIMIT_PER_SEC (default: 50)
    pub rate_limit_per_sec: u64,

    /// Burst size for player endpoints
    /// Env: RATE_LIMIT_BURST (default: 100)
    pub rate_limit_burst: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let _ = dotenv(); //for local runs mostly
        let defaults = Self::default();
        Self {
            request_body_limit: env_or_default("REQUEST_BODY_LIMIT", defaults.request_body_limit),
            request_timeout: Duration::from_secs(env_or_default(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            port: env_or_default("PORT", defaults.port),
            rate_limit_enabled: env_or_default("RATE_LIMIT_ENABLED", defaults.rate_limit_enabled),
            rate_limit_per_sec: env_or_default("RATE_LIMIT_PER_SEC", defaults.rate_limit_per_sec),
            rate_limit_burst: env_or_default("RATE_LIMIT_BURST", defaults.rate_limit_burst),
        }
    }

    /// Rate limit settings, or `None` when rate limiting is switched off
    pub fn rate_limit(&self) -> Option<RateLimitConfig> {
        self.rate_limit_enabled.then(|| RateLimitConfig {
            per_sec: self.rate_limit_per_sec,
            burst: self.rate_limit_burst,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_body_limit: 64 * 1024, // 64 KB
            request_timeout: Duration::from_secs(30),
            port: 8080,
            rate_limit_enabled: true,
            rate_limit_per_sec: 50,
            rate_limit_burst: 100,
        }
    }
}

/// Parse environment variable or return default value
fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.request_body_limit, 64 * 1024);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
        assert!(config.rate_limit_enabled);
        assert_eq!(config.rate_limit_per_sec, 50);
        assert_eq!(config.rate_limit_burst, 100);
    }

    #[test]
    fn test_rate_limit_toggle() {
        let mut config = Config::default();
        let rate_limit = config.rate_limit().unwrap();
        assert_eq!(rate_limit.per_sec, 50);
        assert_eq!(rate_limit.burst, 100);

        config.rate_limit_enabled = false;
        assert!(config.rate_limit().is_none());
    }
}
