/// Error handling for the API server
///
/// Maps the shared domain error taxonomy to HTTP responses. Handlers return
/// `Result<T, ApiError>`; the conversion from [`taskdeck_shared::Error`]
/// encodes the status policy in one place:
///
/// - input validation failures → 400
/// - failed login → 401
/// - "not found" in all its forms, including unauthorized access to an
///   existing resource → 404 (the conflation is deliberate; non-owners
///   learn nothing about existence)
/// - a new password equal to the old one → 409
/// - hashing, signing and store faults → 500, with the internal message
///   logged but never sent to the client
///
/// There is no 403 here: the only Forbidden in the system is emitted by the
/// admin gate in `taskdeck_shared::auth::middleware`, before a handler runs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskdeck_shared::Error;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409)
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert domain errors to API errors
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidId
            | Error::EmptyName
            | Error::EmptyTitle
            | Error::PasswordTooShort
            | Error::OldPasswordIncorrect
            | Error::NoSuchUser => ApiError::BadRequest(err.to_string()),

            Error::PasswordUnchanged => ApiError::Conflict(err.to_string()),

            Error::InvalidCredentials => ApiError::Unauthorized(err.to_string()),

            // Absence and unauthorized access share one terminal status
            Error::UserNotFound
            | Error::TaskNotFound
            | Error::TitleNotUpdated
            | Error::DescriptionNotUpdated
            | Error::StatusNotSwitched
            | Error::TaskNotDeleted
            | Error::RoleNotUpdated => ApiError::NotFound(err.to_string()),

            Error::ForeignKeyViolation => ApiError::BadRequest(err.to_string()),

            Error::Password(e) => ApiError::InternalError(e.to_string()),
            Error::Token(e) => ApiError::InternalError(e.to_string()),
            Error::Database(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = ApiError::NotFound("user not found".to_string());
        assert_eq!(err.to_string(), "Not found: user not found");
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        for err in [Error::InvalidId, Error::EmptyName, Error::PasswordTooShort] {
            assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
        }
    }

    #[test]
    fn test_not_found_conflates_absent_and_unauthorized() {
        for err in [
            Error::UserNotFound,
            Error::TaskNotFound,
            Error::TitleNotUpdated,
            Error::StatusNotSwitched,
        ] {
            assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
        }
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let api_err = ApiError::from(Error::Database(sqlx::Error::PoolClosed));
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unchanged_password_is_conflict() {
        assert!(matches!(
            ApiError::from(Error::PasswordUnchanged),
            ApiError::Conflict(_)
        ));
    }
}
