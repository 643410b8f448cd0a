//! REST API error taxonomy and the single place where internal failures
//! become HTTP responses.
//!
//! Handlers never format error bodies themselves: they return [`ApiError`]
//! and `IntoResponse` maps it to a status code and the uniform
//! `{"status":"error","message":...}` envelope. Unclassified errors are
//! logged with their source location and leave the process as a generic
//! "Internal server error".

use ct_auth::AuthError;
use ct_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid credentials (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Authenticated but not allowed (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Request failed schema validation (400). `message` carries every
    /// field violation, not just the first.
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// Uniqueness violation (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500). The message is logged, never returned.
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, message) = match self {
            ApiError::Unauthorized { message, .. } => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden { message, .. } => (StatusCode::FORBIDDEN, message),
            ApiError::NotFound { message, .. } => (StatusCode::NOT_FOUND, message),
            ApiError::Validation { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict { message, .. } => (StatusCode::CONFLICT, message),
            // Never leak internals to the caller
            ApiError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (
            status,
            Json(ApiErrorResponse {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { .. } => ApiError::Conflict {
                message: "Resource already exists".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            // Don't expose database details to clients
            other => ApiError::Internal {
                message: format!("Database operation failed: {}", other),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert token verification errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingHeader { .. } => ApiError::Unauthorized {
                message: "Not authenticated".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            AuthError::Provider { .. } | AuthError::ManagementToken { .. } => ApiError::Internal {
                message: format!("Identity provider failure: {}", e),
                location: ErrorLocation::from(Location::caller()),
            },
            // Bad scheme, bad signature, expiry, bad claims: the caller
            // only learns the token did not pass
            _ => ApiError::Unauthorized {
                message: "Invalid token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
