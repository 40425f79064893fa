//! Database error types.
//!
//! Provides error handling for store operations using `thiserror`.

use thiserror::Error;

/// Database-specific errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open or create database connection.
    #[error("failed to open database: {0}")]
    Open(String),

    /// Migration execution failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A write would duplicate a unique superhero name.
    #[error("a superhero named \"{name}\" already exists")]
    Conflict {
        /// The contested name
        name: String,
    },

    /// Failed to decode a stored value.
    #[error("decode error: {0}")]
    Decode(String),

    /// Underlying `SQLx` error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Translate a failed write, turning a uniqueness violation into `Conflict`.
    pub(crate) fn from_write(err: sqlx::Error, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict {
                name: name.to_string(),
            },
            _ => Self::Sqlx(err),
        }
    }
}

/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display_names_the_record() {
        let err = DatabaseError::Conflict {
            name: "Nova".to_string(),
        };
        assert_eq!(err.to_string(), "a superhero named \"Nova\" already exists");
    }

    #[test]
    fn test_from_write_passes_through_other_errors() {
        let err = DatabaseError::from_write(sqlx::Error::RowNotFound, "Nova");
        assert!(matches!(err, DatabaseError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
