//! Heroes Database Layer
//!
//! Provides `SQLite` storage for the superheroes directory. Uses `SQLx` with
//! embedded migrations and an FTS5 index for free-text search.
//!
//! # Architecture
//!
//! - **Migrations**: SQL migrations are embedded and versioned using `SQLx`
//! - **Connection Pooling**: File-backed stores use a bounded WAL pool; in-memory
//!   stores pin a single connection
//! - **Text Search**: `superheroes_fts` is kept in sync with the record table by triggers
//! - **Uniqueness**: Names are unique at the schema level and reported as
//!   [`DatabaseError::Conflict`]
//!
//! # Example
//!
//! ```ignore
//! use heroes_db::{Database, superheroes};
//!
//! let db = Database::open("sqlite://superheroes.db", 5).await?;
//! db.run_migrations().await?;
//! let all = superheroes::find(db.pool(), &superheroes::SuperheroFilter::all()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod error;
pub mod migrations;
pub mod seed;
pub mod superheroes;

// Re-export commonly used types
pub use connection::ConnectionPool;
pub use error::{DatabaseError, Result};
pub use superheroes::SuperheroFilter;

use heroes_core::DatabaseConfig;

/// High-level database handle.
///
/// Wraps a [`ConnectionPool`] and exposes schema management. Record
/// operations live in [`superheroes`] and take the pool from [`Database::pool`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Open a database at the given connection string.
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if the store cannot be opened.
    pub async fn open(url: &str, max_connections: u32) -> Result<Self> {
        let pool = ConnectionPool::connect(url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Open the database described by the application configuration.
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if the store cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::open(&config.url, config.max_connections).await
    }

    /// Open a fresh, private in-memory database.
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if `SQLite` cannot allocate the store.
    pub async fn open_in_memory() -> Result<Self> {
        Self::open("sqlite::memory:", 1).await
    }

    /// Run all pending database migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(self.pool.pool()).await
    }

    /// Highest migration version applied to this store, 0 for a blank one.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the version cannot be queried.
    pub async fn get_schema_version(&self) -> Result<i64> {
        let tracked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
        )
        .fetch_one(self.pool())
        .await?;
        if tracked == 0 {
            return Ok(0);
        }

        let version: Option<i64> =
            sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
                .fetch_one(self.pool())
                .await?;
        Ok(version.unwrap_or(0))
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        self.pool.pool()
    }

    /// Check that the store is reachable.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the store does not answer.
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    /// Close the database connection gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = Database::open_in_memory().await.expect("create database");
        db.ping().await.expect("ping");
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let db = Database::open_in_memory().await.expect("create database");

        let version_before = db.get_schema_version().await.expect("get version");
        assert_eq!(version_before, 0);

        db.run_migrations().await.expect("run migrations");

        let version_after = db.get_schema_version().await.expect("get version");
        assert_eq!(version_after, migrations::latest_version());

        db.run_migrations().await.expect("rerun migrations");
        assert_eq!(
            db.get_schema_version().await.expect("get version"),
            version_after
        );
    }

    #[tokio::test]
    async fn test_file_database_persists_across_opens() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}", dir.path().join("heroes.db").display());

        let db = Database::open(&url, 2).await.expect("open database");
        db.run_migrations().await.expect("run migrations");
        seed::seed(db.pool(), &seed::sample_superheroes()).await.expect("seed");
        db.close().await;

        let db = Database::from_config(&DatabaseConfig {
            url,
            max_connections: 2,
        })
        .await
        .expect("reopen database");
        db.run_migrations().await.expect("migrations are idempotent");
        assert_eq!(superheroes::count(db.pool()).await.expect("count"), 8);
        db.close().await;
    }

    #[tokio::test]
    async fn test_database_close() {
        let db = Database::open_in_memory().await.expect("create database");
        db.close().await;
        assert!(db.ping().await.is_err());
    }
}
