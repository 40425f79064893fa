//! Embedded schema for the superheroes table and its text index.

use crate::error::{DatabaseError, Result};
use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Version of the newest migration compiled into this build.
#[must_use]
pub fn latest_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0)
}

/// Bring the schema up to [`latest_version`]. Already applied steps are skipped.
///
/// # Errors
/// Returns `DatabaseError::Migration` if a step fails or an applied step no
/// longer matches its embedded checksum.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    tracing::info!(version = latest_version(), "Superheroes schema is up to date");
    Ok(())
}
