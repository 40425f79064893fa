//! Error types for the directory client.

use heroes_core::ValidationErrors;
use thiserror::Error;

/// Errors that can occur while talking to the directory API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// The request never completed
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response carried an unexpected body
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The form failed local validation; nothing was sent
    #[error("invalid form: {0}")]
    InvalidForm(ValidationErrors),

    /// Client setup failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Text for the error banner.
    ///
    /// Server messages are shown as-is; every other failure shows `fallback`.
    #[must_use]
    pub fn banner_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, when the API answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
