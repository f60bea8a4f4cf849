//! Repository trait for alias data access.

use crate::domain::entities::{Alias, NewAlias, NewRedirectEvent, RedirectEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable alias store.
///
/// The store enforces uniqueness on `short_code` and on `custom_alias`
/// (sparse: absent custom aliases never collide).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Creates a new alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code or custom alias is
    /// already taken, [`AppError::Upstream`] on database errors.
    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, AppError>;

    /// Finds an alias whose `short_code` OR `custom_alias` equals `identifier`.
    ///
    /// Uniqueness guarantees at most one match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Alias>, AppError>;

    /// Returns true if any alias uses `identifier` as its short code or
    /// custom alias. Used for conflict checks before insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn identifier_in_use(&self, identifier: &str) -> Result<bool, AppError>;

    /// Lists all aliases sharing a topic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Alias>, AppError>;

    /// Lists all aliases created by an owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Alias>, AppError>;

    /// Appends a redirect event and increments the alias click counter.
    ///
    /// The append and the increment are atomic with respect to the alias:
    /// concurrent redirects may interleave in any order but never lose an
    /// update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn append_redirect(&self, event: NewRedirectEvent) -> Result<(), AppError>;

    /// Loads the redirect logs of the given aliases, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn events_for_aliases(&self, alias_ids: &[i64]) -> Result<Vec<RedirectEvent>, AppError>;
}
