//! Handlers for the analytics endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::middleware::auth::Identity;
use crate::application::rollup::{AliasRollup, OwnerRollup, TopicRollup};
use crate::error::AppError;
use crate::state::AppState;

/// Rollup for a single alias.
///
/// # Endpoint
///
/// `GET /api/analytics/{identifier}`
///
/// Served from the analytics cache when a rollup computed within the last
/// TTL window exists; redirects that occurred since then appear once the
/// entry expires.
///
/// # Errors
///
/// Returns 404 for an unknown identifier.
pub async fn alias_analytics_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<AliasRollup>, AppError> {
    let rollup = state.analytics_service.alias_analytics(&identifier).await?;
    Ok(Json(rollup))
}

/// Rollup over every alias sharing a topic.
///
/// # Endpoint
///
/// `GET /api/analytics/topic/{topic}`
///
/// # Errors
///
/// Returns 404 when no alias uses the topic.
pub async fn topic_analytics_handler(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<TopicRollup>, AppError> {
    let rollup = state.analytics_service.topic_analytics(&topic).await?;
    Ok(Json(rollup))
}

/// Overall rollup across the caller's aliases.
///
/// # Endpoint
///
/// `GET /api/analytics/overall`
///
/// # Errors
///
/// Returns 404 when the caller has no aliases.
pub async fn overall_analytics_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<OwnerRollup>, AppError> {
    let rollup = state
        .analytics_service
        .owner_analytics(&identity.owner_id)
        .await?;
    Ok(Json(rollup))
}
