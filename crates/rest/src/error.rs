//! Error types for the Log API.
//!
//! This module defines all error types used throughout the REST API layer,
//! with automatic conversion to JSON error responses.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are automatically mapped to
//! appropriate HTTP status codes:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | Validation | 422 |
//! | Tenant (no roles, missing role) | 401 |
//! | Tenant (empty tenant) | 422 |
//! | Configuration | 500 |
//! | Backend unavailable | 503 |
//! | Other backend errors | 500 |
//!
//! Every error body has the shape `{"title": ..., "description": ...}`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use kestrel_persistence::error::{
    BackendError, ConfigurationError, StorageError, TenantError, ValidationError,
};
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Malformed request, such as a missing header (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Caller lacks the roles required (HTTP 401).
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Query failed validation (HTTP 422).
    UnprocessableEntity {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },

    /// No logs repository is configured (HTTP 500).
    NotConfigured,

    /// The backend could not be reached (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
            RestError::UnprocessableEntity { message } => {
                write!(f, "Unprocessable entity: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
            RestError::NotConfigured => {
                write!(f, "Logs repository is not configured")
            }
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::InternalError { .. } | RestError::NotConfigured => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the description sent to the caller.
    pub fn description(&self) -> String {
        match self {
            RestError::BadRequest { message }
            | RestError::Unauthorized { message }
            | RestError::UnprocessableEntity { message }
            | RestError::InternalError { message }
            | RestError::ServiceUnavailable { message } => message.clone(),
            RestError::NotConfigured => "The logs repository is not configured".to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = create_error_body(status, &self.description());

        let mut response = (status, Json(body)).into_response();
        if matches!(self, RestError::Unauthorized { .. }) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Token"));
        }
        response
    }
}

/// Creates an error body.
///
/// # Arguments
///
/// * `status` - The status whose reason phrase becomes the title
/// * `description` - Human-readable details
pub fn create_error_body(status: StatusCode, description: &str) -> serde_json::Value {
    serde_json::json!({
        "title": status.canonical_reason().unwrap_or("Error"),
        "description": description,
    })
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => e.into(),
            StorageError::Tenant(e) => e.into(),
            StorageError::Configuration(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::UnprocessableEntity {
            message: err.to_string(),
        }
    }
}

impl From<TenantError> for RestError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::NoRoles | TenantError::MissingRole => RestError::Unauthorized {
                message: err.to_string(),
            },
            TenantError::EmptyTenant => RestError::UnprocessableEntity {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigurationError> for RestError {
    fn from(err: ConfigurationError) -> Self {
        match err {
            ConfigurationError::RepositoryNotConfigured => RestError::NotConfigured,
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable { .. } => RestError::ServiceUnavailable {
                message: err.to_string(),
            },
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
