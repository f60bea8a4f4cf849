//! PostgreSQL implementation of the alias repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Alias, NewAlias, NewRedirectEvent, RedirectEvent};
use crate::domain::repositories::AliasRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for aliases and their redirect logs.
///
/// Uses runtime-checked prepared statements so the crate builds without a
/// live database. Uniqueness of `short_code` and `custom_alias` is enforced
/// by the schema (`custom_alias` through a partial unique index, so absent
/// values never collide).
pub struct PgAliasRepository {
    pool: Arc<PgPool>,
}

impl PgAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AliasRow {
    id: i64,
    long_url: String,
    short_code: String,
    custom_alias: Option<String>,
    owner_id: String,
    topic: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<AliasRow> for Alias {
    fn from(r: AliasRow) -> Self {
        Alias {
            id: r.id,
            long_url: r.long_url,
            short_code: r.short_code,
            custom_alias: r.custom_alias,
            owner_id: r.owner_id,
            topic: r.topic,
            click_count: r.click_count,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    alias_id: i64,
    occurred_at: DateTime<Utc>,
    client_ip: String,
    user_agent: String,
    os_name: String,
    device_type: String,
}

impl From<EventRow> for RedirectEvent {
    fn from(r: EventRow) -> Self {
        RedirectEvent {
            alias_id: r.alias_id,
            occurred_at: r.occurred_at,
            client_ip: r.client_ip,
            user_agent: r.user_agent,
            os_name: r.os_name,
            device_type: r.device_type,
        }
    }
}

const ALIAS_COLUMNS: &str =
    "id, long_url, short_code, custom_alias, owner_id, topic, click_count, created_at";

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, AppError> {
        let row = sqlx::query_as::<_, AliasRow>(&format!(
            r#"
            INSERT INTO aliases (long_url, short_code, custom_alias, owner_id, topic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ALIAS_COLUMNS}
            "#
        ))
        .bind(&new_alias.long_url)
        .bind(&new_alias.short_code)
        .bind(&new_alias.custom_alias)
        .bind(&new_alias.owner_id)
        .bind(&new_alias.topic)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Alias>, AppError> {
        let row = sqlx::query_as::<_, AliasRow>(&format!(
            r#"
            SELECT {ALIAS_COLUMNS}
            FROM aliases
            WHERE short_code = $1 OR custom_alias = $1
            "#
        ))
        .bind(identifier)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn identifier_in_use(&self, identifier: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM aliases WHERE short_code = $1 OR custom_alias = $1
            )
            "#,
        )
        .bind(identifier)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<Alias>, AppError> {
        let rows = sqlx::query_as::<_, AliasRow>(&format!(
            r#"
            SELECT {ALIAS_COLUMNS}
            FROM aliases
            WHERE topic = $1
            ORDER BY created_at
            "#
        ))
        .bind(topic)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Alias>, AppError> {
        let rows = sqlx::query_as::<_, AliasRow>(&format!(
            r#"
            SELECT {ALIAS_COLUMNS}
            FROM aliases
            WHERE owner_id = $1
            ORDER BY created_at
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn append_redirect(&self, event: NewRedirectEvent) -> Result<(), AppError> {
        // Append and increment in one transaction so click_count always
        // equals the number of logged events, even under concurrent redirects.
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO redirect_events
                (alias_id, occurred_at, client_ip, user_agent, os_name, device_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.alias_id)
        .bind(event.occurred_at)
        .bind(&event.client_ip)
        .bind(&event.user_agent)
        .bind(&event.os_name)
        .bind(&event.device_type)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query("UPDATE aliases SET click_count = click_count + 1 WHERE id = $1")
            .bind(event.alias_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn events_for_aliases(&self, alias_ids: &[i64]) -> Result<Vec<RedirectEvent>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT alias_id, occurred_at, client_ip, user_agent, os_name, device_type
            FROM redirect_events
            WHERE alias_id = ANY($1)
            ORDER BY occurred_at
            "#,
        )
        .bind(alias_ids)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
