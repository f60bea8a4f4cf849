//! End-to-end service flows over in-memory backends.
//!
//! Wires the real services against the fakes in `common` so create,
//! redirect and analytics paths run exactly as in production, minus
//! Postgres and Redis.

mod common;

use std::sync::Arc;

use linkpulse::application::services::{AliasService, AnalyticsService, RedirectService};
use linkpulse::error::AppError;
use linkpulse::infrastructure::cache::{analytics_key, resolve_key};
use linkpulse::infrastructure::classifier::WootheeClassifier;

use common::{MemoryAliasRepository, MemoryCache};

const CHROME_ON_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

struct Harness {
    repository: Arc<MemoryAliasRepository>,
    cache: Arc<MemoryCache>,
    alias_service: AliasService<MemoryAliasRepository>,
    redirect_service: RedirectService<MemoryAliasRepository, MemoryCache, WootheeClassifier>,
    analytics_service: AnalyticsService<MemoryAliasRepository, MemoryCache>,
}

fn harness() -> Harness {
    let repository = Arc::new(MemoryAliasRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let classifier = Arc::new(WootheeClassifier::new());

    Harness {
        repository: repository.clone(),
        cache: cache.clone(),
        alias_service: AliasService::new(repository.clone()),
        redirect_service: RedirectService::new(
            repository.clone(),
            cache.clone(),
            classifier,
            3600,
        ),
        analytics_service: AnalyticsService::new(repository, cache, 300),
    }
}

#[tokio::test]
async fn test_create_redirect_and_alias_analytics() {
    let h = harness();

    let alias = h
        .alias_service
        .create_alias(
            "https://example.com".to_string(),
            None,
            Some("launch".to_string()),
            "owner-1".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(alias.topic, "launch");
    assert!(!alias.short_code.is_empty());

    // Three redirects: two visitors, one of them twice.
    for ip in ["1.1.1.1", "1.1.1.1", "2.2.2.2"] {
        let destination = h
            .redirect_service
            .resolve_and_log(&alias.short_code, ip, CHROME_ON_WINDOWS)
            .await
            .unwrap();
        assert_eq!(destination, "https://example.com");
    }
    assert_eq!(h.repository.click_count(&alias.short_code), Some(3));

    let rollup = h
        .analytics_service
        .alias_analytics(&alias.short_code)
        .await
        .unwrap();

    assert_eq!(rollup.total_clicks, 3);
    assert_eq!(rollup.unique_clicks, 2);

    assert_eq!(rollup.clicks_by_date.len(), 7);
    let today = rollup.clicks_by_date.last().unwrap();
    assert_eq!(today.count, 3);
    assert!(rollup.clicks_by_date[..6].iter().all(|d| d.count == 0));

    assert_eq!(rollup.os_type.len(), 1);
    assert!(rollup.os_type[0].os_name.starts_with("Windows"));
    assert_eq!(rollup.os_type[0].unique_clicks, 3);

    assert_eq!(rollup.device_type.len(), 1);
    assert_eq!(rollup.device_type[0].device_name, "Desktop");
    assert_eq!(rollup.device_type[0].unique_clicks, 3);
}

#[tokio::test]
async fn test_repeat_redirects_are_cached_but_still_counted() {
    let h = harness();

    let alias = h
        .alias_service
        .create_alias(
            "https://example.com/page".to_string(),
            None,
            None,
            "owner-1".to_string(),
        )
        .await
        .unwrap();

    h.redirect_service
        .resolve_and_log(&alias.short_code, "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    assert!(h.cache.contains(&resolve_key(&alias.short_code)));

    // Second hit resolves from cache and must still append an event.
    let destination = h
        .redirect_service
        .resolve_and_log(&alias.short_code, "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    assert_eq!(destination, "https://example.com/page");
    assert_eq!(h.repository.click_count(&alias.short_code), Some(2));
}

#[tokio::test]
async fn test_unknown_identifier_is_not_found_and_not_cached() {
    let h = harness();

    let err = h
        .redirect_service
        .resolve_and_log("missing", "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_custom_alias_conflict_leaves_store_unchanged() {
    let h = harness();

    h.alias_service
        .create_alias(
            "https://example.com/a".to_string(),
            Some("promo".to_string()),
            None,
            "owner-1".to_string(),
        )
        .await
        .unwrap();

    let err = h
        .alias_service
        .create_alias(
            "https://example.com/b".to_string(),
            Some("promo".to_string()),
            None,
            "owner-2".to_string(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(h.repository.alias_count(), 1);
}

#[tokio::test]
async fn test_custom_alias_resolves_and_names_topic_summary() {
    let h = harness();

    let alias = h
        .alias_service
        .create_alias(
            "https://example.com/sale".to_string(),
            Some("summer-sale".to_string()),
            Some("marketing".to_string()),
            "owner-1".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(alias.custom_alias.as_deref(), Some("summer-sale"));

    let destination = h
        .redirect_service
        .resolve_and_log("summer-sale", "3.3.3.3", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    assert_eq!(destination, "https://example.com/sale");

    let rollup = h
        .analytics_service
        .topic_analytics("marketing")
        .await
        .unwrap();
    assert_eq!(rollup.total_clicks, 1);
    assert_eq!(rollup.urls.len(), 1);
    assert_eq!(rollup.urls[0].short_url, "summer-sale");
    assert_eq!(rollup.urls[0].total_clicks, 1);
}

#[tokio::test]
async fn test_topic_with_no_aliases_is_not_found() {
    let h = harness();

    let err = h
        .analytics_service
        .topic_analytics("ghost-topic")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(!h.cache.contains(&analytics_key("topic", "ghost-topic")));
}

#[tokio::test]
async fn test_memoized_rollup_is_stale_until_expiry() {
    let h = harness();

    let alias = h
        .alias_service
        .create_alias(
            "https://example.com".to_string(),
            None,
            None,
            "owner-1".to_string(),
        )
        .await
        .unwrap();

    h.redirect_service
        .resolve_and_log(&alias.short_code, "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    let first = h
        .analytics_service
        .alias_analytics(&alias.short_code)
        .await
        .unwrap();
    assert_eq!(first.total_clicks, 1);

    // New traffic while the rollup is memoized is invisible.
    h.redirect_service
        .resolve_and_log(&alias.short_code, "2.2.2.2", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    let stale = h
        .analytics_service
        .alias_analytics(&alias.short_code)
        .await
        .unwrap();
    assert_eq!(stale, first);

    // After expiry the next query recomputes from the log.
    h.cache.expire_all();
    let fresh = h
        .analytics_service
        .alias_analytics(&alias.short_code)
        .await
        .unwrap();
    assert_eq!(fresh.total_clicks, 2);
    assert_eq!(fresh.unique_clicks, 2);
}

#[tokio::test]
async fn test_owner_analytics_spans_aliases_and_counts_users() {
    let h = harness();

    let first = h
        .alias_service
        .create_alias(
            "https://example.com/one".to_string(),
            None,
            None,
            "owner-1".to_string(),
        )
        .await
        .unwrap();
    let second = h
        .alias_service
        .create_alias(
            "https://example.com/two".to_string(),
            None,
            None,
            "owner-1".to_string(),
        )
        .await
        .unwrap();

    h.redirect_service
        .resolve_and_log(&first.short_code, "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    h.redirect_service
        .resolve_and_log(&second.short_code, "1.1.1.1", CHROME_ON_WINDOWS)
        .await
        .unwrap();
    h.redirect_service
        .resolve_and_log(&second.short_code, "2.2.2.2", CHROME_ON_WINDOWS)
        .await
        .unwrap();

    let rollup = h
        .analytics_service
        .owner_analytics("owner-1")
        .await
        .unwrap();

    assert_eq!(rollup.total_urls, 2);
    assert_eq!(rollup.total_clicks, 3);
    assert_eq!(rollup.unique_clicks, 2);
    assert_eq!(rollup.os_type.len(), 1);
    assert_eq!(rollup.os_type[0].unique_clicks, 3);
    assert_eq!(rollup.os_type[0].unique_users, 2);
    assert_eq!(rollup.device_type[0].unique_users, 2);
}
