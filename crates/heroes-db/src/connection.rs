//! Database connection management.
//!
//! Provides a `ConnectionPool` wrapper around `SQLx` that parses the configured
//! connection string and sizes the pool for file-backed or in-memory stores.

use crate::error::{DatabaseError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// `SQLite` connection pool for the record store.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    pool: Pool<Sqlite>,
}

impl ConnectionPool {
    /// Open a connection pool.
    ///
    /// # Arguments
    /// * `url` - `SQLite` connection string (`sqlite://heroes.db`, `sqlite::memory:`)
    /// * `max_connections` - Upper bound for file-backed stores
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if the connection string is invalid or the
    /// database file cannot be opened or created.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let in_memory = is_in_memory(url);

        let mut connect_options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DatabaseError::Open(format!("invalid connection string: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory store lives only as long as its connections, so keep
        // exactly one alive for the lifetime of the pool.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DatabaseError::Open(format!("failed to initialize pool: {e}")))?;

        tracing::info!(in_memory, "Database pool created for {}", url);

        Ok(Self { pool })
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close the connection pool gracefully.
    ///
    /// This waits for checked-out connections to be returned before closing.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }

    /// Check that the store answers a trivial query.
    ///
    /// # Errors
    /// Returns `DatabaseError::Sqlx` if the pool is closed or the database is unusable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    rest == ":memory:" || rest.contains("mode=memory")
}
