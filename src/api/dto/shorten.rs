//! DTOs for the alias creation endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Alias;

/// Compiled regex for custom alias validation.
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,

    /// Optional user-chosen alias (validated for length and characters).
    #[validate(length(min = 4, max = 32))]
    #[validate(regex(path = "*CUSTOM_ALIAS_REGEX"))]
    pub custom_alias: Option<String>,

    /// Optional categorization topic; defaults to `"general"`.
    pub topic: Option<String>,
}

/// Public view of a created alias.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasView {
    /// Display identifier: the custom alias when set, the generated short
    /// code otherwise.
    pub short_url: String,
    pub long_url: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

impl From<Alias> for AliasView {
    fn from(alias: Alias) -> Self {
        Self {
            short_url: alias.display_identifier().to_string(),
            long_url: alias.long_url,
            topic: alias.topic,
            created_at: alias.created_at,
        }
    }
}
