//! Error types for API handlers.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heroes_core::ValidationErrors;
use heroes_db::DatabaseError;
use serde::Serialize;
use thiserror::Error;

/// Message returned when a record id does not resolve.
pub const NOT_FOUND_MESSAGE: &str = "Superhero not found";

/// Message returned when a write would duplicate a name.
pub const CONFLICT_MESSAGE: &str = "A superhero with this name already exists";

/// Message returned for any failure the caller cannot act on.
pub const INTERNAL_MESSAGE: &str = "Server error";

/// Message heading a list of field errors.
pub const VALIDATION_MESSAGE: &str = "Validation error";

/// Failure of an API request, rendered as a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload was malformed or broke a field rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No record has the requested id.
    #[error("superhero not found")]
    NotFound,

    /// Another record already carries this name.
    #[error("duplicate superhero name: {0}")]
    Conflict(String),

    /// Anything else; the detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// User-friendly message
    pub message: String,
    /// Field-level messages, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// Create a body carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body returned to the caller.
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(errors) => ErrorBody {
                message: VALIDATION_MESSAGE.to_string(),
                errors: Some(errors.messages()),
            },
            Self::NotFound => ErrorBody::new(NOT_FOUND_MESSAGE),
            Self::Conflict(_) => ErrorBody::new(CONFLICT_MESSAGE),
            Self::Internal(_) => ErrorBody::new(INTERNAL_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => tracing::error!("Request failed: {}", detail),
            other => tracing::debug!("Request rejected: {}", other),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// Convert DatabaseError to ApiError, keeping name conflicts visible.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict { name } => Self::Conflict(name),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// A body that is not JSON at all is reported like any other bad payload.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationErrors::single(
            "body",
            format!("Request body must be valid JSON ({})", rejection.body_text()),
        ))
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use heroes_core::FieldError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationErrors::default()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("Nova".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_lists_messages() {
        let err = ApiError::Validation(ValidationErrors::new(vec![
            FieldError::new("name", "Superhero name is required"),
            FieldError::new("powers", "At least one power is required"),
        ]));
        let json = serde_json::to_value(err.body()).expect("serialize body");
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Validation error",
                "errors": ["Superhero name is required", "At least one power is required"]
            })
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = ApiError::Internal("disk I/O error at /var/db".to_string());
        let json = serde_json::to_string(&err.body()).expect("serialize body");
        assert_eq!(json, r#"{"message":"Server error"}"#);
    }

    #[test]
    fn test_database_conflict_conversion() {
        let err: ApiError = DatabaseError::Conflict {
            name: "Nova".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(ref name) if name == "Nova"));
        assert_eq!(err.body().message, CONFLICT_MESSAGE);
    }

    #[test]
    fn test_database_error_conversion() {
        let err: ApiError = DatabaseError::Decode("bad row".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
