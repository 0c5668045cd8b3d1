use crate::error::{is_unique_violation, map_sqlx_error};
use async_trait::async_trait;
use burrow_core::repository::{LinkStore, ReadLinkStore, Result};
use burrow_core::{AdminPassword, LinkId, LinkRecord, NewLink, StorageError};
use jiff::Timestamp;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

const URLS_DDL: &str = include_str!("../ddl/postgres/urls.sql");

/// PostgreSQL implementation of the link store contract.
///
/// All rows live in the single `urls` table keyed by `id`. The primary-key
/// constraint is the only source of truth for whether an id is taken; an
/// insert that violates it is reported as [`StorageError::Conflict`].
#[derive(Debug, Clone)]
pub struct PostgresLinkStore {
    pool: PgPool,
}

impl PostgresLinkStore {
    /// Creates a store from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `urls` table and adds any column an older deployment is
    /// missing. Safe to run on every start.
    pub async fn bootstrap_schema(&self) -> Result<()> {
        sqlx::raw_sql(URLS_DDL)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        info!("link schema is up to date");
        Ok(())
    }
}

fn parse_created_at(seconds: Option<i64>) -> Result<Option<Timestamp>> {
    seconds
        .map(|value| {
            Timestamp::from_second(value).map_err(|e| {
                StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", value))
            })
        })
        .transpose()
}

fn record_from_row(row: &PgRow) -> Result<LinkRecord> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    let target_url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let needs_captcha: bool = row.try_get("needs_captcha").map_err(map_sqlx_error)?;
    let needs_password: bool = row.try_get("needs_password").map_err(map_sqlx_error)?;
    let created_at_raw: Option<i64> = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(LinkRecord {
        id: LinkId::new_unchecked(id),
        target_url,
        needs_captcha,
        needs_password,
        created_at: parse_created_at(created_at_raw)?,
    })
}

#[async_trait]
impl ReadLinkStore for PostgresLinkStore {
    async fn get(&self, id: &LinkId) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, url, needs_captcha, needs_password,
                   EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn get_with_password(
        &self,
        id: &LinkId,
        admin_password: &AdminPassword,
    ) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, url, needs_captcha, needs_password,
                   EXTRACT(EPOCH FROM created_at)::BIGINT AS created_at
            FROM urls
            WHERE id = $1
              AND admin_password = $2
            "#,
        )
        .bind(id.as_str())
        .bind(admin_password.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }
}

#[async_trait]
impl LinkStore for PostgresLinkStore {
    async fn insert(&self, link: &NewLink) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (id, url, needs_captcha, needs_password, admin_password)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(link.id.as_str())
        .bind(link.target_url.as_str())
        .bind(link.needs_captcha)
        .bind(link.needs_password)
        .bind(link.admin_password.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(link.id.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: &LinkId, admin_password: &AdminPassword) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM urls
            WHERE id = $1
              AND admin_password = $2
            "#,
        )
        .bind(id.as_str())
        .bind(admin_password.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_is_optional() {
        assert_eq!(parse_created_at(None).unwrap(), None);
    }

    #[test]
    fn created_at_parses_unix_seconds() {
        let parsed = parse_created_at(Some(1_700_000_000)).unwrap().unwrap();
        assert_eq!(parsed.as_second(), 1_700_000_000);
    }

    #[test]
    fn created_at_out_of_range_is_invalid_data() {
        let err = parse_created_at(Some(i64::MAX)).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[test]
    fn ddl_adds_optional_columns_idempotently() {
        assert!(URLS_DDL.contains("CREATE TABLE IF NOT EXISTS urls"));
        assert!(URLS_DDL.contains("ADD COLUMN IF NOT EXISTS admin_password"));
    }
}
