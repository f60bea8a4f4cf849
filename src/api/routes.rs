//! API route configuration.
//!
//! All `/api` endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    alias_analytics_handler, overall_analytics_handler, shorten_handler, topic_analytics_handler,
};
use crate::state::AppState;

/// Authenticated API routes.
///
/// # Endpoints
///
/// - `POST /shorten`                    - Create a shortened alias
/// - `GET  /analytics/overall`          - Overall rollup for the caller
/// - `GET  /analytics/topic/{topic}`    - Rollup for a topic
/// - `GET  /analytics/{identifier}`     - Rollup for a single alias
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/overall", get(overall_analytics_handler))
        .route("/analytics/topic/{topic}", get(topic_analytics_handler))
        .route("/analytics/{identifier}", get(alias_analytics_handler))
}
