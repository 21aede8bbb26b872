//! Field validation rules for user records.
//!
//! One fixed rule set for one resource. The request DTO composes these
//! rules into the single shared schema used by the create, batch-create,
//! and update paths, so the three endpoints cannot drift apart.

use crate::FieldError;

/// Maximum length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 255;
/// Maximum length for first and last names.
pub const MAX_NAME_LENGTH: usize = 255;
/// Maximum length for phone numbers.
pub const MAX_PHONE_LENGTH: usize = 20;
/// Maximum length for image URLs.
pub const MAX_IMG_LENGTH: usize = 255;
/// Minimum length for passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Individual validation rules.
///
/// Each rule returns the violation as a `FieldError` instead of failing
/// fast, so callers can collect the complete error set for a record.
pub mod rules {
    use super::FieldError;
    use validator::ValidateEmail;

    /// Validates that a required string field is present and non-empty.
    pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, FieldError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(FieldError::new(
                field,
                "required",
                format!("The {} field is required.", field),
            )),
        }
    }

    /// Validates that a required boolean field is present.
    pub fn required_bool(field: &str, value: Option<bool>) -> Result<bool, FieldError> {
        value.ok_or_else(|| {
            FieldError::new(
                field,
                "required",
                format!("The {} field is required.", field),
            )
        })
    }

    /// Validates a maximum character length.
    pub fn max_length(field: &str, value: &str, max: usize) -> Option<FieldError> {
        if value.chars().count() > max {
            return Some(FieldError::new(
                field,
                "max",
                format!("The {} may not be greater than {} characters.", field, max),
            ));
        }
        None
    }

    /// Validates a minimum character length.
    pub fn min_length(field: &str, value: &str, min: usize) -> Option<FieldError> {
        if value.chars().count() < min {
            return Some(FieldError::new(
                field,
                "min",
                format!("The {} must be at least {} characters.", field, min),
            ));
        }
        None
    }

    /// Validates email address syntax.
    pub fn email_syntax(field: &str, value: &str) -> Option<FieldError> {
        if !value.trim().to_lowercase().validate_email() {
            return Some(FieldError::new(
                field,
                "email",
                format!("The {} must be a valid email address.", field),
            ));
        }
        None
    }

    /// The uniqueness violation for an already-registered email.
    ///
    /// Raised by the service layer after checking storage (and, for
    /// batches, the in-flight record set).
    #[must_use]
    pub fn email_taken() -> FieldError {
        FieldError::new("email", "unique", "The email has already been taken.")
    }
}
