//! Error types for the persistence layer.
//!
//! This module defines all error types used by the log query path, following a
//! hierarchy that separates validation errors, tenant/authorization errors,
//! configuration errors, and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all repository operations.
///
/// This enum encompasses all possible errors that can occur while listing logs,
/// organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Malformed or disallowed query input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Caller roles do not permit the requested operation
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Deployment faults
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to query validation.
///
/// Every variant names the offending input so the message can be returned to
/// the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A query parameter has an invalid value.
    #[error("Parameter {parameter} value {value} {message}")]
    InvalidParameter {
        parameter: String,
        value: String,
        message: String,
    },

    /// A query parameter is not recognized.
    #[error("Unknown query parameter {parameter}")]
    UnknownParameter { parameter: String },

    /// The dimensions parameter could not be parsed or validated.
    #[error("{message}")]
    InvalidDimension { message: String },

    /// The sort_by parameter could not be parsed or validated.
    #[error("{message}")]
    InvalidSortBy { message: String },

    /// The requested time range is not ordered.
    #[error("{message}")]
    InvalidTimeRange { message: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidParameter`].
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidDimension`].
    pub fn dimension(message: impl Into<String>) -> Self {
        ValidationError::InvalidDimension {
            message: message.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidSortBy`].
    pub fn sort_by(message: impl Into<String>) -> Self {
        ValidationError::InvalidSortBy {
            message: message.into(),
        }
    }
}

/// Errors related to caller identity and tenant scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    /// The caller presented no roles at all.
    #[error("Tenant does not have any roles")]
    NoRoles,

    /// None of the caller's roles is authorized for this service.
    #[error("Tenant ID is missing a required role to access this service")]
    MissingRole,

    /// The effective tenant resolved to an empty identifier.
    #[error("tenant id must not be empty")]
    EmptyTenant,
}

/// Errors caused by invalid deployment configuration.
///
/// These are never user-actionable; the HTTP layer reports them as server errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The index pattern has no `{tenant_id}` placeholder.
    #[error("index pattern '{pattern}' must contain a {{tenant_id}} placeholder")]
    InvalidIndexPattern { pattern: String },

    /// An index name was requested for an empty tenant.
    #[error("cannot resolve an index name for an empty tenant id")]
    EmptyTenant,

    /// A configuration value is invalid.
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: String, message: String },

    /// No repository driver has been configured.
    #[error("logs repository is not configured")]
    RepositoryNotConfigured,
}

/// Errors originating from the search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// The backend answered with a document that does not have the expected shape.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for query validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(feature = "elasticsearch")]
impl From<elasticsearch::Error> for BackendError {
    fn from(err: elasticsearch::Error) -> Self {
        BackendError::Internal {
            backend_name: "elasticsearch".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ValidationError::invalid_parameter("limit", "abc", "must be an integer");
        assert_eq!(err.to_string(), "Parameter limit value abc must be an integer");
    }

    #[test]
    fn test_tenant_error_display() {
        assert_eq!(
            TenantError::NoRoles.to_string(),
            "Tenant does not have any roles"
        );
        assert!(TenantError::MissingRole.to_string().contains("missing a required role"));
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::InvalidIndexPattern {
            pattern: "logs-*".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "index pattern 'logs-*' must contain a {tenant_id} placeholder"
        );
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err: StorageError = ValidationError::dimension("Dimensions are malformed").into();
        assert_eq!(err.to_string(), "Dimensions are malformed");
    }

    #[test]
    fn test_backend_internal_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = BackendError::Internal {
            backend_name: "elasticsearch".to_string(),
            message: io.to_string(),
            source: Some(Box::new(io)),
        };
        assert!(err.source().is_some());
    }
}
