//! Error handling for cardroom_web
//!
//! This module provides:
//! - The JSON error body shared by every endpoint
//! - HTTP status code mappings through [`IntoErrorResponse`]
//! - Request-boundary errors ([`ApiError`])
//! - Severity-based error logging

use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Standard error response format for all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "game_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Convert to HTTP response with specified status code
    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Client errors (4xx) - expected, normal operation
    Client,
    /// Server errors (5xx) - unexpected, needs investigation
    Server,
    /// Critical errors - shared state can no longer be trusted
    Critical,
}

/// Trait for converting errors to HTTP responses with proper logging
pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error code
    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Convert to HTTP response, logging at a level matching the severity
    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let error_response = self.to_error_response();

        match self.severity() {
            ErrorSeverity::Client => {
                tracing::info!(
                    status = status.as_u16(),
                    error = %error_response.error,
                    "client error: {}",
                    error_response.message
                );
            }
            ErrorSeverity::Server => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %error_response.error,
                    "server error: {}",
                    error_response.message
                );
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %error_response.error,
                    critical = true,
                    "critical error: {}",
                    error_response.message
                );
            }
        }

        error_response.into_response(status)
    }
}

/// Failures detected at the request boundary, before or after the registry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing {0}")]
    MissingIdentifier(&'static str),
    #[error("Invalid numToDeal: {0}")]
    InvalidCount(String),
    #[error("Unsupported content type: {0}")]
    UnsupportedMediaType(String),
    #[error("Unreadable request body: {0}")]
    InvalidBody(String),
    #[error("Error converting to JSON: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl IntoErrorResponse for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingIdentifier(_)
            | ApiError::InvalidCount(_)
            | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Registry(err) => err.status_code(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingIdentifier(_) => "missing_identifier",
            ApiError::InvalidCount(_) => "invalid_count",
            ApiError::UnsupportedMediaType(_) => "unsupported_media_type",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Encoding(_) => "encoding_error",
            ApiError::Registry(err) => err.error_code(),
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::MissingIdentifier(field) => Some(serde_json::json!({ "field": field })),
            ApiError::Registry(err) => err.error_details(),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::Registry(err) => err.severity(),
            ApiError::Encoding(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse::new("test_error", "Test error message");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "test_error");
        assert_eq!(json["message"], "Test error message");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn error_response_display() {
        let error = ErrorResponse::new("game_not_found", "Game not found: abc");
        assert_eq!(format!("{}", error), "game_not_found: Game not found: abc");
    }

    #[test]
    fn missing_identifier_is_a_bad_request() {
        let err = ApiError::MissingIdentifier("Game ID");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_message(), "Missing Game ID");
        assert_eq!(err.error_details(), Some(json!({ "field": "Game ID" })));
    }

    #[test]
    fn unreadable_bodies_are_client_errors() {
        let err = ApiError::UnsupportedMediaType("application/json".into());
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.error_code(), "unsupported_media_type");
        assert_eq!(err.severity(), ErrorSeverity::Client);

        let err = ApiError::InvalidBody("not UTF-8".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "invalid_body");
    }

    #[test]
    fn registry_errors_keep_their_status_and_code() {
        let err = ApiError::from(RegistryError::NotFound("g1".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "game_not_found");
        assert_eq!(err.error_details(), Some(json!({ "game_id": "g1" })));

        let err = ApiError::from(RegistryError::InsufficientCards {
            game_id: "g1".into(),
            requested: 3,
            remaining: 1,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.severity(), ErrorSeverity::Client);
    }

    #[test]
    fn poisoned_storage_is_critical() {
        let err = ApiError::from(RegistryError::StoragePoisoned);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn encoding_failure_is_a_server_error() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(bad);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "encoding_error");
    }
}
