//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `AUTH_SIGNING_SECRET` - HMAC secret for bearer token verification
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` - Redis connection (enables caching if set)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RESOLVE_CACHE_TTL_SECONDS` - Alias resolution TTL (default: 3600)
//! - `ANALYTICS_CACHE_TTL_SECONDS` - Rollup memoization TTL (default: 300)
//! - `REDIRECT_QUEUE_CAPACITY` - Redirect record buffer size (default: 10000)
//! - `DB_MAX_CONNECTIONS` / `DB_CONNECT_TIMEOUT` - Pool tuning

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// TTL (seconds) for cached alias-to-destination resolutions.
    pub resolve_cache_ttl_seconds: u64,
    /// TTL (seconds) for memoized analytics rollups. Bounds staleness.
    pub analytics_cache_ttl_seconds: u64,
    /// Capacity of the bounded redirect record queue.
    pub redirect_queue_capacity: usize,
    /// HMAC signing secret for bearer tokens. Must be non-empty.
    pub auth_signing_secret: String,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30). Bounds how long a store call
    /// can block before surfacing as an upstream failure.
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` or `AUTH_SIGNING_SECRET` is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let resolve_cache_ttl_seconds = env_parse("RESOLVE_CACHE_TTL_SECONDS", 3600);
        let analytics_cache_ttl_seconds = env_parse("ANALYTICS_CACHE_TTL_SECONDS", 300);
        let redirect_queue_capacity = env_parse("REDIRECT_QUEUE_CAPACITY", 10_000);

        let auth_signing_secret =
            env::var("AUTH_SIGNING_SECRET").context("AUTH_SIGNING_SECRET must be set")?;
        if auth_signing_secret.is_empty() {
            anyhow::bail!("AUTH_SIGNING_SECRET must not be empty");
        }

        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", 10);
        let db_connect_timeout = env_parse("DB_CONNECT_TIMEOUT", 30);

        Ok(Self {
            database_url,
            redis_url,
            listen_addr,
            log_level,
            log_format,
            resolve_cache_ttl_seconds,
            analytics_cache_ttl_seconds,
            redirect_queue_capacity,
            auth_signing_secret,
            db_max_connections,
            db_connect_timeout,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
