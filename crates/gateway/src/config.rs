//! Gateway configuration loaded from environment variables.

use std::time::Duration;

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `DATABASE_URL` — PostgreSQL connection string (required to serve)
/// - `CALL_TIMEOUT_MS` — per-call backend deadline (default: `3000`)
/// - `REQUEST_TIMEOUT_MS` — inbound request budget (default: `10000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub call_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    ///
    /// The per-call deadline must stay strictly inside the inbound budget;
    /// a violating value is halved down from the budget.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_url = std::env::var("DATABASE_URL").ok();
        let request_timeout = duration_var("REQUEST_TIMEOUT_MS", 10_000);
        let mut call_timeout = duration_var("CALL_TIMEOUT_MS", 3_000);

        if call_timeout >= request_timeout {
            tracing::warn!(
                ?call_timeout,
                ?request_timeout,
                "CALL_TIMEOUT_MS must be shorter than REQUEST_TIMEOUT_MS, halving the budget"
            );
            call_timeout = request_timeout / 2;
        }

        Self {
            host,
            port,
            database_url,
            call_timeout,
            request_timeout,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn duration_var(name: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
            call_timeout: Duration::from_millis(3_000),
            request_timeout: Duration::from_millis(10_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.call_timeout < config.request_timeout);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9090,
            ..Default::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:9090");
    }
}
