//! Alias creation service.

use std::sync::Arc;

use crate::domain::entities::{Alias, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_long_url;
use serde_json::json;

/// Default topic applied when the creator supplies none.
const DEFAULT_TOPIC: &str = "general";

/// Service for creating shortened aliases.
///
/// Validation happens before any store write: an invalid URL or a taken
/// custom alias fails the request with no side effects.
pub struct AliasService<R: AliasRepository> {
    repository: Arc<R>,
}

impl<R: AliasRepository> AliasService<R> {
    /// Creates a new alias service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new alias for an authenticated owner.
    ///
    /// A `short_code` is always generated, even when a custom alias is
    /// supplied; the two coexist and lookup accepts either. Display prefers
    /// the custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed or the
    /// custom alias has an invalid shape, [`AppError::Conflict`] if the
    /// custom alias is already in use as anyone's short code or custom
    /// alias.
    pub async fn create_alias(
        &self,
        long_url: String,
        custom_alias: Option<String>,
        topic: Option<String>,
        owner_id: String,
    ) -> Result<Alias, AppError> {
        validate_long_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(custom) = &custom_alias {
            validate_custom_alias(custom)?;

            if self.repository.identifier_in_use(custom).await? {
                return Err(AppError::conflict(
                    "Custom alias already in use",
                    json!({ "alias": custom }),
                ));
            }
        }

        let short_code = self.generate_unique_code().await?;

        let new_alias = NewAlias {
            long_url,
            short_code,
            custom_alias,
            owner_id,
            topic: topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        };

        self.repository.insert(new_alias).await
    }

    /// Generates a unique short code with collision retry.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if !self.repository.identifier_in_use(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
