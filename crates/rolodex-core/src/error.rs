//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Rolodex.
///
/// The enumeration is closed on purpose: every failure a handler can see
/// maps to exactly one variant, and every variant maps to exactly one
/// HTTP status code.
#[derive(Error, Debug)]
pub enum RolodexError {
    /// Resource not found
    #[error("User not found: {id}")]
    NotFound { id: String },

    /// Validation failure on a single record (single-create path)
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// A record in a batch (or an update body) was rejected.
    ///
    /// `index` is the zero-based position of the failing record within the
    /// submitted batch; `None` for the update path, which carries a single
    /// record.
    #[error("Record {} failed validation: {}", .index.map_or_else(|| "-".to_string(), |i| i.to_string()), summarize(.errors))]
    InvalidRecord {
        index: Option<usize>,
        errors: Vec<FieldError>,
    },

    /// Unique-email constraint violation surfaced by the storage engine
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl RolodexError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::InvalidRecord { .. } => 422,
            Self::DuplicateEmail(_) => 409,
            Self::Unauthorized(_) => 401,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a user.
    #[must_use]
    pub fn not_found<T: ToString>(id: T) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Creates a validation error from a set of field errors.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    /// Creates a rejected-record error for position `index` of a batch.
    #[must_use]
    pub fn invalid_record(index: usize, errors: Vec<FieldError>) -> Self {
        Self::InvalidRecord {
            index: Some(index),
            errors,
        }
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RolodexError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL 1062 / PostgreSQL 23505: unique constraint violation.
                // The unique index on users.email is the authoritative check,
                // so a constraint hit here is always a duplicate email.
                if let Some(code) = db_err.code() {
                    if code == "1062" || code == "23505" {
                        return Self::DuplicateEmail(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RolodexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Rule that was violated (e.g. "required", "max_length")
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Zero-based index of the failing record for batch submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<usize>,
}

impl ErrorResponse {
    /// Creates a new error response from a `RolodexError`.
    #[must_use]
    pub fn from_error(error: &RolodexError) -> Self {
        let (errors, record) = match error {
            RolodexError::Validation(errors) => (Some(errors.clone()), None),
            RolodexError::InvalidRecord { index, errors } => (Some(errors.clone()), *index),
            _ => (None, None),
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            errors,
            record,
        }
    }
}

impl From<&RolodexError> for ErrorResponse {
    fn from(error: &RolodexError) -> Self {
        Self::from_error(error)
    }
}
