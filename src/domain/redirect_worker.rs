//! Background worker draining the redirect record queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::services::RedirectService;
use crate::domain::redirect_record::RedirectRecord;
use crate::domain::repositories::AliasRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::classifier::UserAgentClassifier;

/// Drains redirect records and appends them to the store.
///
/// Runs until the channel's senders are dropped. An append failure is
/// logged and the record is dropped; the redirect it belongs to has already
/// been served.
pub async fn run_redirect_worker<R, C, U>(
    mut rx: mpsc::Receiver<RedirectRecord>,
    service: Arc<RedirectService<R, C, U>>,
) where
    R: AliasRepository,
    C: CacheService + ?Sized,
    U: UserAgentClassifier,
{
    while let Some(record) = rx.recv().await {
        match service
            .record_redirect(&record.identifier, &record.client_ip, &record.user_agent)
            .await
        {
            Ok(()) => debug!("Recorded redirect for {}", record.identifier),
            Err(e) => warn!("Failed to record redirect for {}: {e:?}", record.identifier),
        }
    }

    debug!("Redirect worker shutting down");
}
