//! Alias resolution and redirect logging.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::domain::entities::NewRedirectEvent;
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, resolve_key};
use crate::infrastructure::classifier::UserAgentClassifier;

/// Resolves aliases to destinations and records redirect events.
///
/// Resolution is read-through: cache first, store on miss, cache populated
/// before returning. Note that resolution is deliberately not a pure read -
/// a successful resolve populates the cache, and every redirect appends an
/// event to the alias's log and increments its click counter.
pub struct RedirectService<R, C, U>
where
    R: AliasRepository,
    C: CacheService + ?Sized,
    U: UserAgentClassifier,
{
    repository: Arc<R>,
    cache: Arc<C>,
    classifier: Arc<U>,
    resolve_ttl_seconds: u64,
}

impl<R, C, U> RedirectService<R, C, U>
where
    R: AliasRepository,
    C: CacheService + ?Sized,
    U: UserAgentClassifier,
{
    /// Creates a new redirect service.
    ///
    /// `resolve_ttl_seconds` controls how long resolved destinations stay
    /// cached (3600 by default, via [`crate::config::Config`]).
    pub fn new(repository: Arc<R>, cache: Arc<C>, classifier: Arc<U>, resolve_ttl_seconds: u64) -> Self {
        Self {
            repository,
            cache,
            classifier,
            resolve_ttl_seconds,
        }
    }

    /// Resolves an identifier (short code or custom alias) to its
    /// destination URL.
    ///
    /// On a cache hit the store is not consulted at all. On a miss the
    /// alias is looked up, the cache is populated synchronously, and the
    /// destination is returned. Cache failures degrade to misses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown identifiers (the cache is
    /// left untouched), [`AppError::Upstream`] on store errors.
    pub async fn resolve(&self, identifier: &str) -> Result<String, AppError> {
        let key = resolve_key(identifier);

        if let Ok(Some(cached_url)) = self.cache.get(&key).await {
            return Ok(cached_url);
        }

        let alias = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "identifier": identifier }))
            })?;

        // Two concurrent misses may both write this entry; the overwrite is
        // idempotent and harmless.
        let _ = self
            .cache
            .set(&key, &alias.long_url, self.resolve_ttl_seconds)
            .await;

        Ok(alias.long_url)
    }

    /// Appends one redirect event to the alias's log, deriving the OS and
    /// device classification from the raw user-agent string.
    ///
    /// Every redirect is one event - repeat visitors are not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias vanished between resolve
    /// and append, [`AppError::Upstream`] on store errors.
    pub async fn record_redirect(
        &self,
        identifier: &str,
        client_ip: &str,
        user_agent: &str,
    ) -> Result<(), AppError> {
        let alias = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "identifier": identifier }))
            })?;

        let classification = self.classifier.classify(user_agent);

        self.repository
            .append_redirect(NewRedirectEvent {
                alias_id: alias.id,
                occurred_at: Utc::now(),
                client_ip: client_ip.to_string(),
                user_agent: user_agent.to_string(),
                os_name: classification.os_name,
                device_type: classification.device_type,
            })
            .await
    }

    /// Resolves an identifier and records the redirect in one call.
    ///
    /// The primary contract is "redirect works": if the append fails after
    /// a successful resolve, the failure is logged and the destination is
    /// still returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown identifiers,
    /// [`AppError::Upstream`] when the store is unavailable on the resolve
    /// path.
    pub async fn resolve_and_log(
        &self,
        identifier: &str,
        client_ip: &str,
        user_agent: &str,
    ) -> Result<String, AppError> {
        let destination = self.resolve(identifier).await?;

        if let Err(e) = self.record_redirect(identifier, client_ip, user_agent).await {
            warn!("Failed to record redirect for {identifier}: {e:?}");
        }

        Ok(destination)
    }
}
