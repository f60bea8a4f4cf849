//! Alias entity: a shortened URL and its append-only redirect log.

use chrono::{DateTime, Utc};

/// A shortened URL record.
///
/// `short_code` is always system-generated and globally unique. When the
/// creator supplied a `custom_alias` it is also globally unique and takes
/// precedence for display and lookup. `click_count` equals the number of
/// redirect events recorded against the alias.
#[derive(Debug, Clone)]
pub struct Alias {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub owner_id: String,
    pub topic: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Alias {
    /// The identifier shown to users: the custom alias when set, otherwise
    /// the generated short code.
    pub fn display_identifier(&self) -> &str {
        self.custom_alias.as_deref().unwrap_or(&self.short_code)
    }
}

/// Input data for creating a new alias.
#[derive(Debug, Clone)]
pub struct NewAlias {
    pub long_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub owner_id: String,
    pub topic: String,
}

/// One recorded redirect through an alias. Immutable once written.
#[derive(Debug, Clone)]
pub struct RedirectEvent {
    pub alias_id: i64,
    pub occurred_at: DateTime<Utc>,
    pub client_ip: String,
    pub user_agent: String,
    pub os_name: String,
    pub device_type: String,
}

/// Input data for appending a redirect event.
#[derive(Debug, Clone)]
pub struct NewRedirectEvent {
    pub alias_id: i64,
    pub occurred_at: DateTime<Utc>,
    pub client_ip: String,
    pub user_agent: String,
    pub os_name: String,
    pub device_type: String,
}
