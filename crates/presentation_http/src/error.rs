//! API error handling
//!
//! Maps application failures onto the three user-facing outcomes: bad
//! input, an unmatched place, and an unreachable provider. Anything else
//! is an internal error with a generic body.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            },
            Self::Internal(msg) => {
                // Internal details stay in the logs, not the response
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound { subject } => Self::NotFound(subject),
            ApplicationError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_message() {
        let err = ApiError::BadRequest("invalid coordinates".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid coordinates");
    }

    #[test]
    fn not_found_message() {
        let err = ApiError::NotFound("Atlantis".to_string());
        assert_eq!(err.to_string(), "Not found: Atlantis");
    }

    #[test]
    fn into_response_status_codes() {
        assert_eq!(
            ApiError::BadRequest(String::new()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound(String::new()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ServiceUnavailable(String::new())
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(String::new()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_input_converts_to_bad_request() {
        let source = ApplicationError::InvalidInput("lat is not a number".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn not_found_carries_subject() {
        let source = ApplicationError::not_found("Atlantis");
        let result: ApiError = source.into();
        let ApiError::NotFound(subject) = result else {
            unreachable!("Expected NotFound");
        };
        assert_eq!(subject, "Atlantis");
    }

    #[test]
    fn unavailable_converts_to_service_unavailable() {
        let source = ApplicationError::Unavailable("current weather: timeout".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn configuration_converts_to_internal() {
        let source = ApplicationError::Configuration("bad config".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn domain_error_converts_to_bad_request() {
        let source = ApplicationError::Domain(domain::DomainError::InvalidCoordinates);
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("code"));
    }
}
