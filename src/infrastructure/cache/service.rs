//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache with per-key expiry.
///
/// Serves two namespaces: alias resolution (`resolve:{identifier}`, long
/// TTL) and memoized analytics rollups (`analytics:{scope}:{id}`, short
/// TTL). Entries are pure performance optimizations; implementations must
/// be thread-safe and fail open so that a broken cache only costs latency,
/// never correctness.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with the given TTL in seconds.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations log failures
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}

/// Key for a cached alias-to-destination resolution.
pub fn resolve_key(identifier: &str) -> String {
    format!("resolve:{}", identifier)
}

/// Key for a memoized analytics rollup, namespaced by scope.
pub fn analytics_key(scope: &str, identifier: &str) -> String {
    format!("analytics:{}:{}", scope, identifier)
}
