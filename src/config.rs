//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed by
//! value to the components that need it. Nothing reads the environment later.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite URL (default: `sqlite://shorten_url.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:5001`)
//! - `BASE_URL` - Public origin used in short links, e.g. `https://s.example.com`.
//!   When unset the origin of each request is used.
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CODE_MAX_ATTEMPTS` - Cap on candidate codes per shorten call
//!   (default: unset or `0`, meaning no cap)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)
//! - `DB_BUSY_TIMEOUT` - Seconds to wait on a locked database (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::infrastructure::persistence::PoolSettings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    /// `None` retries code generation until a free code is found.
    pub code_max_attempts: Option<u32>,

    // ── Pool settings ───────────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Time a statement waits for a database lock in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://shorten_url.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:5001".to_string());
        let base_url = env::var("BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let code_max_attempts = parse_var::<u32>("CODE_MAX_ATTEMPTS")?.filter(|&n| n > 0);

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(10);
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT")?.unwrap_or(30);
        let db_busy_timeout = parse_var("DB_BUSY_TIMEOUT")?.unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            code_max_attempts,
            db_max_connections,
            db_connect_timeout,
            db_busy_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a `sqlite:` URL
    /// - `base_url` is not an absolute http(s) URL
    /// - a pool setting is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if let Some(ref base_url) = self.base_url {
            let parsed = url::Url::parse(base_url)
                .with_context(|| format!("BASE_URL is not a valid URL: '{base_url}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("BASE_URL must use http or https, got '{}'", base_url);
            }
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Connection pool settings derived from this configuration.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            connect_timeout: self.db_connect_timeout,
            busy_timeout: self.db_busy_timeout,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        match self.base_url {
            Some(ref base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: taken from request"),
        }
        match self.code_max_attempts {
            Some(max) => tracing::info!("  Code attempts cap: {}", max),
            None => tracing::info!("  Code attempts cap: none"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads an optional numeric variable. Unset or empty yields `None`.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{value}'")),
        _ => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "DATABASE_URL",
        "LISTEN",
        "BASE_URL",
        "LOG_FORMAT",
        "CODE_MAX_ATTEMPTS",
        "DB_MAX_CONNECTIONS",
        "DB_CONNECT_TIMEOUT",
        "DB_BUSY_TIMEOUT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially via #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "0.0.0.0:5001".to_string(),
            base_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            code_max_attempts: None,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_busy_timeout: 5,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "5001".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:5001".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());
        config.database_url = "sqlite://shorten_url.db".to_string();

        config.base_url = Some("ftp://s.example.com".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("https://s.example.com".to_string());
        assert!(config.validate().is_ok());

        config.db_max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_settings() {
        let mut config = valid_config();
        config.db_max_connections = 4;
        config.db_busy_timeout = 1;

        let settings = config.pool_settings();
        assert_eq!(settings.max_connections, 4);
        assert_eq!(settings.connect_timeout, 30);
        assert_eq!(settings.busy_timeout, 1);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://shorten_url.db");
        assert_eq!(config.listen_addr, "0.0.0.0:5001");
        assert!(config.base_url.is_none());
        assert!(config.code_max_attempts.is_none());
        assert_eq!(config.db_max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DATABASE_URL", "sqlite::memory:");
            env::set_var("BASE_URL", "https://s.example.com/");
            env::set_var("CODE_MAX_ATTEMPTS", "25");
            env::set_var("DB_MAX_CONNECTIONS", "3");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.base_url.as_deref(), Some("https://s.example.com"));
        assert_eq!(config.code_max_attempts, Some(25));
        assert_eq!(config.db_max_connections, 3);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_attempts_means_unbounded() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("CODE_MAX_ATTEMPTS", "0");
        }

        let config = Config::from_env().unwrap();
        assert!(config.code_max_attempts.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_an_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DB_MAX_CONNECTIONS", "many");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DB_MAX_CONNECTIONS"));

        clear_env();
    }
}
