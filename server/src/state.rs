//! Application state management.

use heroes_db::Database;
use std::sync::Arc;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Open record store; its pool is the only shared resource
    pub db: Arc<Database>,
}

impl AppState {
    /// Wrap an opened, migrated database.
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}
