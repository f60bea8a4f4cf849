//! Handler for the alias creation endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{AliasView, ShortenRequest};
use crate::api::middleware::auth::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened alias for the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "customAlias": "my-link",   // optional
///   "topic": "launch"           // optional, defaults to "general"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for an invalid URL or alias shape, 409 when the custom
/// alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<AliasView>), AppError> {
    payload.validate()?;

    let alias = state
        .alias_service
        .create_alias(
            payload.long_url,
            payload.custom_alias,
            payload.topic,
            identity.owner_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(alias.into())))
}
