//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::redirect_record::RedirectRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its destination URL.
///
/// # Endpoint
///
/// `GET /{identifier}`
///
/// # Request Flow
///
/// 1. Resolve through the service (cache first, store on miss)
/// 2. Send a redirect record to the background worker (fire-and-forget)
/// 3. Return 307 Temporary Redirect
///
/// Every redirect is logged, including resolution cache hits. If the queue
/// is full the record is dropped; serving the redirect takes priority over
/// logging it.
///
/// # Errors
///
/// Returns 404 if the identifier doesn't exist.
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.redirect_service.resolve(&identifier).await?;

    let record = RedirectRecord::new(
        identifier,
        addr.ip().to_string(),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    if state.redirect_tx.try_send(record).is_err() {
        warn!("Redirect queue full; dropping record");
    }

    Ok(Redirect::temporary(&destination))
}
