//! On-demand analytics aggregation over redirect logs.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::warn;

use crate::application::rollup::{
    AliasClickSummary, AliasRollup, DailyClicks, DeviceBucket, DeviceUserBucket, OsBucket,
    OsUserBucket, OwnerRollup, TopicRollup,
};
use crate::domain::entities::{Alias, RedirectEvent};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, analytics_key};

/// Number of calendar days in the clicks-by-date histogram.
const HISTOGRAM_DAYS: i64 = 7;

/// Computes time-bucketed, per-dimension rollups from redirect logs.
///
/// Results are memoized in the cache with a short TTL; a hit returns the
/// cached rollup verbatim, so redirects that happen after the cache was
/// populated are invisible until the entry expires. That staleness is part
/// of the contract, not a bug.
pub struct AnalyticsService<R: AliasRepository, C: CacheService + ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    cache_ttl_seconds: u64,
}

impl<R: AliasRepository, C: CacheService + ?Sized> AnalyticsService<R, C> {
    /// Creates a new analytics service.
    ///
    /// `cache_ttl_seconds` bounds rollup staleness (300 by default, via
    /// [`crate::config::Config`]).
    pub fn new(repository: Arc<R>, cache: Arc<C>, cache_ttl_seconds: u64) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Rollup for a single alias, looked up by short code or custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown identifiers,
    /// [`AppError::Upstream`] on store errors.
    pub async fn alias_analytics(&self, identifier: &str) -> Result<AliasRollup, AppError> {
        let key = analytics_key("alias", identifier);
        if let Some(cached) = self.cached(&key).await {
            return Ok(cached);
        }

        let alias = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "identifier": identifier }))
            })?;

        let events = self.repository.events_for_aliases(&[alias.id]).await?;
        let today = Utc::now().date_naive();

        let rollup = AliasRollup {
            total_clicks: alias.click_count as u64,
            unique_clicks: unique_ips(&events),
            clicks_by_date: clicks_by_date(&events, today),
            os_type: os_buckets(&events),
            device_type: device_buckets(&events),
        };

        self.memoize(&key, &rollup).await;
        Ok(rollup)
    }

    /// Rollup over every alias sharing a topic, including a per-alias
    /// click summary.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no alias uses the topic,
    /// [`AppError::Upstream`] on store errors.
    pub async fn topic_analytics(&self, topic: &str) -> Result<TopicRollup, AppError> {
        let key = analytics_key("topic", topic);
        if let Some(cached) = self.cached(&key).await {
            return Ok(cached);
        }

        let aliases = self.repository.find_by_topic(topic).await?;
        if aliases.is_empty() {
            return Err(AppError::not_found(
                "No URLs found under this topic",
                json!({ "topic": topic }),
            ));
        }

        let events = self.load_events(&aliases).await?;
        let today = Utc::now().date_naive();

        let urls = aliases
            .iter()
            .map(|alias| {
                let alias_events: Vec<&RedirectEvent> =
                    events.iter().filter(|e| e.alias_id == alias.id).collect();
                AliasClickSummary {
                    short_url: alias.display_identifier().to_string(),
                    total_clicks: alias.click_count as u64,
                    unique_clicks: alias_events
                        .iter()
                        .map(|e| e.client_ip.as_str())
                        .collect::<HashSet<_>>()
                        .len() as u64,
                }
            })
            .collect();

        let rollup = TopicRollup {
            total_clicks: total_clicks(&aliases),
            unique_clicks: unique_ips(&events),
            clicks_by_date: clicks_by_date(&events, today),
            os_type: os_buckets(&events),
            device_type: device_buckets(&events),
            urls,
        };

        self.memoize(&key, &rollup).await;
        Ok(rollup)
    }

    /// Overall rollup across every alias an owner has created.
    ///
    /// The only scope whose OS/device buckets also report distinct
    /// visitors (`uniqueUsers`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the owner has no aliases,
    /// [`AppError::Upstream`] on store errors.
    pub async fn owner_analytics(&self, owner_id: &str) -> Result<OwnerRollup, AppError> {
        let key = analytics_key("owner", owner_id);
        if let Some(cached) = self.cached(&key).await {
            return Ok(cached);
        }

        let aliases = self.repository.find_by_owner(owner_id).await?;
        if aliases.is_empty() {
            return Err(AppError::not_found(
                "No URLs found for this user",
                json!({ "owner_id": owner_id }),
            ));
        }

        let events = self.load_events(&aliases).await?;
        let today = Utc::now().date_naive();

        let rollup = OwnerRollup {
            total_urls: aliases.len() as u64,
            total_clicks: total_clicks(&aliases),
            unique_clicks: unique_ips(&events),
            clicks_by_date: clicks_by_date(&events, today),
            os_type: os_user_buckets(&events),
            device_type: device_user_buckets(&events),
        };

        self.memoize(&key, &rollup).await;
        Ok(rollup)
    }

    async fn load_events(&self, aliases: &[Alias]) -> Result<Vec<RedirectEvent>, AppError> {
        let ids: Vec<i64> = aliases.iter().map(|a| a.id).collect();
        self.repository.events_for_aliases(&ids).await
    }

    /// Returns the memoized rollup for `key`, if present and readable.
    ///
    /// An unreadable entry is treated as a miss and recomputed.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cached = self.cache.get(key).await.ok()??;
        match serde_json::from_str(&cached) {
            Ok(rollup) => Some(rollup),
            Err(e) => {
                warn!("Discarding unreadable analytics cache entry {key}: {e}");
                None
            }
        }
    }

    /// Stores a computed rollup unconditionally, even when all its counts
    /// are zero.
    async fn memoize<T: Serialize>(&self, key: &str, rollup: &T) {
        match serde_json::to_string(rollup) {
            Ok(serialized) => {
                let _ = self
                    .cache
                    .set(key, &serialized, self.cache_ttl_seconds)
                    .await;
            }
            Err(e) => warn!("Failed to serialize rollup for {key}: {e}"),
        }
    }
}

fn total_clicks(aliases: &[Alias]) -> u64 {
    aliases.iter().map(|a| a.click_count as u64).sum()
}

fn unique_ips(events: &[RedirectEvent]) -> u64 {
    events
        .iter()
        .map(|e| e.client_ip.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Buckets events into the last seven UTC calendar days ending `today`,
/// oldest first. Events outside the window are ignored here; they still
/// count toward the scope's totals.
fn clicks_by_date(events: &[RedirectEvent], today: NaiveDate) -> Vec<DailyClicks> {
    (0..HISTOGRAM_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let count = events
                .iter()
                .filter(|e| e.occurred_at.date_naive() == date)
                .count() as u64;
            DailyClicks { date, count }
        })
        .collect()
}

/// Event count per dimension value, in deterministic (sorted) order.
fn count_by<F>(events: &[RedirectEvent], dimension: F) -> BTreeMap<String, u64>
where
    F: Fn(&RedirectEvent) -> &str,
{
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(dimension(event).to_string()).or_insert(0) += 1;
    }
    counts
}

/// Event count plus distinct-IP count per dimension value.
fn count_with_users<F>(events: &[RedirectEvent], dimension: F) -> BTreeMap<String, (u64, u64)>
where
    F: Fn(&RedirectEvent) -> &str,
{
    let mut buckets: BTreeMap<String, (u64, HashSet<&str>)> = BTreeMap::new();
    for event in events {
        let entry = buckets.entry(dimension(event).to_string()).or_default();
        entry.0 += 1;
        entry.1.insert(event.client_ip.as_str());
    }
    buckets
        .into_iter()
        .map(|(name, (clicks, users))| (name, (clicks, users.len() as u64)))
        .collect()
}

fn os_buckets(events: &[RedirectEvent]) -> Vec<OsBucket> {
    count_by(events, |e| &e.os_name)
        .into_iter()
        .map(|(os_name, unique_clicks)| OsBucket {
            os_name,
            unique_clicks,
        })
        .collect()
}

fn device_buckets(events: &[RedirectEvent]) -> Vec<DeviceBucket> {
    count_by(events, |e| &e.device_type)
        .into_iter()
        .map(|(device_name, unique_clicks)| DeviceBucket {
            device_name,
            unique_clicks,
        })
        .collect()
}

fn os_user_buckets(events: &[RedirectEvent]) -> Vec<OsUserBucket> {
    count_with_users(events, |e| &e.os_name)
        .into_iter()
        .map(|(os_name, (unique_clicks, unique_users))| OsUserBucket {
            os_name,
            unique_clicks,
            unique_users,
        })
        .collect()
}

fn device_user_buckets(events: &[RedirectEvent]) -> Vec<DeviceUserBucket> {
    count_with_users(events, |e| &e.device_type)
        .into_iter()
        .map(|(device_name, (unique_clicks, unique_users))| DeviceUserBucket {
            device_name,
            unique_clicks,
            unique_users,
        })
        .collect()
}
