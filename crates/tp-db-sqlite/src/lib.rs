//! # tp-db-sqlite
//!
//! SQLite implementation of the tp-core repository ports, mapping between
//! the relational schema and the domain models. Migrations are embedded
//! and applied on connect.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use tp_core::error::{AppError, Result};

mod posts;
mod users;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if necessary) the database at `url` and runs any
    /// pending migrations.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_err)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(db_err)?;

        Self::with_pool(pool).await
    }

    /// In-memory database for tests. A single connection, because every
    /// `:memory:` connection is its own database.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(db_err)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(db_err)?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("migration failed: {e}")))?;
        tracing::debug!("sqlite store ready");
        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// True when a row with the given id exists in `posts`.
    pub(crate) async fn post_exists(&self, post_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM posts WHERE post_id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.is_some())
    }
}

/// Maps a driver error to the domain. Unique violations are conflicts;
/// everything else is infrastructure.
pub(crate) fn db_err(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict("record already exists".to_string())
    } else {
        AppError::Internal(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e.as_database_error().map(|d| d.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}
