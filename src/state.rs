//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AliasService, AnalyticsService, RedirectService};
use crate::domain::redirect_record::RedirectRecord;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::classifier::WootheeClassifier;
use crate::infrastructure::persistence::PgAliasRepository;

/// Service types as wired in production.
pub type AppAliasService = AliasService<PgAliasRepository>;
pub type AppRedirectService =
    RedirectService<PgAliasRepository, dyn CacheService, WootheeClassifier>;
pub type AppAnalyticsService = AnalyticsService<PgAliasRepository, dyn CacheService>;

/// Process-wide handles, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AppAliasService>,
    pub redirect_service: Arc<AppRedirectService>,
    pub analytics_service: Arc<AppAnalyticsService>,
    pub cache: Arc<dyn CacheService>,
    /// Bounded queue feeding the redirect worker. A full queue drops the
    /// record rather than delaying the redirect.
    pub redirect_tx: mpsc::Sender<RedirectRecord>,
    /// HMAC secret used to verify bearer tokens.
    pub auth_signing_secret: String,
}
