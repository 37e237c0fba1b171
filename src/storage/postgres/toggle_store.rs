//! PostgreSQL ToggleStore implementation.
//!
//! The toggles table is the system of record. Key uniqueness is enforced by
//! the primary key constraint; a unique violation maps to the typed
//! `AlreadyExists` outcome so callers can distinguish it from generic
//! failure. Timestamps are assigned here, on write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_query::{Expr, PostgresQueryBuilder, Query};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use switchboard_client::Toggle;
use tracing::debug;

use crate::error::{Result, ToggleError};
use crate::interfaces::ToggleStore;
use crate::storage::schema::{Toggles, CREATE_TOGGLES_TABLE};

/// PostgreSQL error code for unique constraint violations.
/// See https://www.postgresql.org/docs/current/errcodes-appendix.html
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// PostgreSQL implementation of ToggleStore.
pub struct PostgresToggleStore {
    pool: PgPool,
}

impl PostgresToggleStore {
    /// Create a store over an existing connection pool.
    ///
    /// The pool is shared across all repository instances in a process and
    /// is safe for concurrent use.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the toggles table if it does not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_TOGGLES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(ToggleError::internal)?;
        Ok(())
    }

    fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(
            err,
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION_CODE)
        )
    }

    fn toggle_from_row(row: &PgRow) -> Result<Toggle> {
        Ok(Toggle {
            key: row.try_get("key").map_err(ToggleError::internal)?,
            is_enabled: row
                .try_get("is_enabled")
                .map_err(ToggleError::internal)?,
            description: row
                .try_get("description")
                .map_err(ToggleError::internal)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(ToggleError::internal)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(ToggleError::internal)?,
        })
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM toggles WHERE key = $1)")
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(ToggleError::internal)
    }
}

#[async_trait]
impl ToggleStore for PostgresToggleStore {
    async fn insert(&self, toggle: &Toggle) -> Result<Toggle> {
        let query = Query::insert()
            .into_table(Toggles::Table)
            .columns([
                Toggles::Key,
                Toggles::IsEnabled,
                Toggles::Description,
                Toggles::CreatedAt,
                Toggles::UpdatedAt,
            ])
            .values_panic([
                toggle.key.as_str().into(),
                toggle.is_enabled.into(),
                toggle.description.as_str().into(),
                Expr::current_timestamp().into(),
                Expr::current_timestamp().into(),
            ])
            .returning(Query::returning().columns([
                Toggles::Key,
                Toggles::IsEnabled,
                Toggles::Description,
                Toggles::CreatedAt,
                Toggles::UpdatedAt,
            ]))
            .to_string(PostgresQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    ToggleError::AlreadyExists
                } else {
                    ToggleError::internal(e)
                }
            })?;

        debug!(key = %toggle.key, "inserted toggle");
        Self::toggle_from_row(&row)
    }

    async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        let query = Query::select()
            .columns([
                Toggles::Key,
                Toggles::IsEnabled,
                Toggles::Description,
                Toggles::CreatedAt,
                Toggles::UpdatedAt,
            ])
            .from(Toggles::Table)
            .and_where(Expr::col(Toggles::Key).eq(key))
            .limit(1)
            .to_string(PostgresQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(ToggleError::internal)?;

        match row {
            Some(row) => Self::toggle_from_row(&row),
            None => Err(ToggleError::NotFound),
        }
    }

    async fn get_all(&self, limit: u32) -> Result<Vec<Toggle>> {
        let query = Query::select()
            .columns([
                Toggles::Key,
                Toggles::IsEnabled,
                Toggles::Description,
                Toggles::CreatedAt,
                Toggles::UpdatedAt,
            ])
            .from(Toggles::Table)
            .limit(limit as u64)
            .to_string(PostgresQueryBuilder);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(ToggleError::internal)?;

        rows.iter().map(Self::toggle_from_row).collect()
    }

    async fn update_is_enabled(&self, key: &str, value: bool) -> Result<()> {
        if !self.exists(key).await? {
            return Err(ToggleError::NotFound);
        }

        let query = Query::update()
            .table(Toggles::Table)
            .value(Toggles::IsEnabled, value)
            .value(Toggles::UpdatedAt, Expr::current_timestamp())
            .and_where(Expr::col(Toggles::Key).eq(key))
            .to_string(PostgresQueryBuilder);

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(ToggleError::internal)?;

        debug!(key = %key, is_enabled = value, "updated toggle flag");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let query = Query::delete()
            .from_table(Toggles::Table)
            .and_where(Expr::col(Toggles::Key).eq(key))
            .to_string(PostgresQueryBuilder);

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(ToggleError::internal)?;

        debug!(key = %key, "deleted toggle");
        Ok(())
    }
}
