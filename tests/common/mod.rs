//! In-memory test doubles for the alias store and cache.
//!
//! These fakes implement the same traits as the production Postgres/Redis
//! backends so service flows can be exercised end to end without external
//! services.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use linkpulse::domain::entities::{Alias, NewAlias, NewRedirectEvent, RedirectEvent};
use linkpulse::domain::repositories::AliasRepository;
use linkpulse::error::AppError;
use linkpulse::infrastructure::cache::{CacheResult, CacheService};

#[derive(Default)]
struct StoreInner {
    aliases: Vec<Alias>,
    events: Vec<RedirectEvent>,
    next_id: i64,
}

/// In-memory alias store honoring the uniqueness invariants.
#[derive(Default)]
pub struct MemoryAliasRepository {
    inner: Mutex<StoreInner>,
}

impl MemoryAliasRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current click counter of an alias, for assertions.
    pub fn click_count(&self, identifier: &str) -> Option<i64> {
        let inner = self.inner.lock().unwrap();
        inner
            .aliases
            .iter()
            .find(|a| a.short_code == identifier || a.custom_alias.as_deref() == Some(identifier))
            .map(|a| a.click_count)
    }

    pub fn alias_count(&self) -> usize {
        self.inner.lock().unwrap().aliases.len()
    }
}

fn in_use(inner: &StoreInner, identifier: &str) -> bool {
    inner
        .aliases
        .iter()
        .any(|a| a.short_code == identifier || a.custom_alias.as_deref() == Some(identifier))
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if in_use(&inner, &new_alias.short_code) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        if let Some(custom) = &new_alias.custom_alias {
            if in_use(&inner, custom) {
                return Err(AppError::conflict("Unique constraint violation", json!({})));
            }
        }

        inner.next_id += 1;
        let alias = Alias {
            id: inner.next_id,
            long_url: new_alias.long_url,
            short_code: new_alias.short_code,
            custom_alias: new_alias.custom_alias,
            owner_id: new_alias.owner_id,
            topic: new_alias.topic,
            click_count: 0,
            created_at: Utc::now(),
        };
        inner.aliases.push(alias.clone());
        Ok(alias)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Alias>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .aliases
            .iter()
            .find(|a| a.short_code == identifier || a.custom_alias.as_deref() == Some(identifier))
            .cloned())
    }

    async fn identifier_in_use(&self, identifier: &str) -> Result<bool, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(in_use(&inner, identifier))
    }

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Alias>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .aliases
            .iter()
            .filter(|a| a.topic == topic)
            .cloned()
            .collect())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Alias>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .aliases
            .iter()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn append_redirect(&self, event: NewRedirectEvent) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();

        inner.events.push(RedirectEvent {
            alias_id: event.alias_id,
            occurred_at: event.occurred_at,
            client_ip: event.client_ip,
            user_agent: event.user_agent,
            os_name: event.os_name,
            device_type: event.device_type,
        });

        let alias = inner
            .aliases
            .iter_mut()
            .find(|a| a.id == event.alias_id)
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({})))?;
        alias.click_count += 1;
        Ok(())
    }

    async fn events_for_aliases(&self, alias_ids: &[i64]) -> Result<Vec<RedirectEvent>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .events
            .iter()
            .filter(|e| alias_ids.contains(&e.alias_id))
            .cloned()
            .collect())
    }
}

/// In-memory cache. TTLs are accepted but never expire within a test run.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Drops all entries, simulating TTL expiry.
    pub fn expire_all(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
