//! Core error types for the superheroes directory.
//!
//! This module defines the error types shared by every crate in the workspace:
//! field-level validation failures, malformed ids and configuration errors.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A string that is not a well-formed superhero id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid superhero id: {0}")]
pub struct InvalidIdError(pub String);

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, in its JSON (camelCase) spelling
    pub field: &'static str,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every validation failure collected for one input, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wrap a list of field errors.
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    /// Shorthand for a single failure.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    /// Whether no failures were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The collected field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The human-readable messages, without field names.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether a given field has at least one failure.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}


/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvalidIdError("abc".to_string());
        assert_eq!(err.to_string(), "invalid superhero id: abc");

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_validation_errors_display_joins_messages() {
        let errors = ValidationErrors::new(vec![
            FieldError::new("name", "Superhero name is required"),
            FieldError::new("universe", "Universe must be marvel, dc, or other"),
        ]);
        assert_eq!(
            errors.to_string(),
            "Superhero name is required; Universe must be marvel, dc, or other"
        );
        assert!(errors.has_field("universe"));
        assert!(!errors.has_field("alignment"));
    }
}
