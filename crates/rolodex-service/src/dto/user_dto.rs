//! User-related DTOs.

use chrono::{DateTime, Utc};
use rolodex_core::validation::{
    rules, MAX_EMAIL_LENGTH, MAX_IMG_LENGTH, MAX_NAME_LENGTH, MAX_PHONE_LENGTH,
    MIN_PASSWORD_LENGTH,
};
use rolodex_core::{Email, FieldError, NewUser, User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create (or fully update) a user.
///
/// All fields are optional at the wire level so a missing required field
/// surfaces as a structured field error rather than a deserialization
/// failure. [`validate`](Self::validate) applies the shared rule set and
/// produces a normalized record. The same type backs the single-create,
/// batch-create, and update paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Email address, unique across the directory.
    pub email: Option<String>,

    /// User's last name.
    pub last_name: Option<String>,

    /// User's first name.
    pub first_name: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Whether the user is verified.
    pub verified: Option<bool>,

    /// Plaintext password. Optional; hashed before storage when present.
    pub password: Option<String>,

    /// Profile image URL.
    pub img: Option<String>,
}

impl CreateUserRequest {
    /// Validates the request against the shared field rules and returns a
    /// normalized record.
    ///
    /// All rule violations are collected before returning, in field order:
    /// email, last_name, first_name, phone, verified, password, img.
    pub fn validate(&self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = match rules::required("email", self.email.as_deref()) {
            Ok(raw) => {
                if let Some(err) = rules::max_length("email", raw, MAX_EMAIL_LENGTH) {
                    errors.push(err);
                    None
                } else if let Some(err) = rules::email_syntax("email", raw) {
                    errors.push(err);
                    None
                } else {
                    // Syntax was checked above, construction cannot fail.
                    Email::new(raw).ok()
                }
            }
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let last_name = required_bounded("last_name", self.last_name.as_deref(), &mut errors);
        let first_name = required_bounded("first_name", self.first_name.as_deref(), &mut errors);

        let phone = match rules::required("phone", self.phone.as_deref()) {
            Ok(raw) => {
                if let Some(err) = rules::max_length("phone", raw, MAX_PHONE_LENGTH) {
                    errors.push(err);
                    None
                } else {
                    Some(raw.to_string())
                }
            }
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let verified = match rules::required_bool("verified", self.verified) {
            Ok(v) => Some(v),
            Err(err) => {
                errors.push(err);
                None
            }
        };

        if let Some(password) = self.password.as_deref() {
            if let Some(err) = rules::min_length("password", password, MIN_PASSWORD_LENGTH) {
                errors.push(err);
            }
        }

        if let Some(img) = self.img.as_deref() {
            if let Some(err) = rules::max_length("img", img, MAX_IMG_LENGTH) {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // All required fields validated above.
        match (email, last_name, first_name, phone, verified) {
            (Some(email), Some(last_name), Some(first_name), Some(phone), Some(verified)) => {
                Ok(NewUser {
                    email,
                    last_name,
                    first_name,
                    phone,
                    verified,
                    password: self.password.clone(),
                    img: self.img.clone(),
                })
            }
            _ => Err(vec![FieldError::new(
                "request",
                "invalid",
                "The request could not be validated.",
            )]),
        }
    }

}

/// Required string field with the standard name length bound.
fn required_bounded(
    field: &str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match rules::required(field, value) {
        Ok(raw) => {
            if let Some(err) = rules::max_length(field, raw, MAX_NAME_LENGTH) {
                errors.push(err);
                None
            } else {
                Some(raw.to_string())
            }
        }
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub img: Option<String>,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.to_string(),
            img: user.img,
            last_name: user.last_name,
            first_name: user.first_name,
            phone: user.phone,
            verified: user.verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        user.clone().into()
    }
}

/// Response for a successful single create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    pub message: String,
    pub user: UserResponse,
}

impl CreatedUserResponse {
    #[must_use]
    pub fn new(user: UserResponse) -> Self {
        Self {
            message: "User created successfully".to_string(),
            user,
        }
    }
}

/// Response for a successful update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatedUserResponse {
    pub message: String,
    pub user: UserResponse,
}

impl UpdatedUserResponse {
    #[must_use]
    pub fn new(user: UserResponse) -> Self {
        Self {
            message: "User updated successfully".to_string(),
            user,
        }
    }
}

/// Response for a successful batch create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchCreateResponse {
    pub message: String,
    pub created: usize,
}

impl BatchCreateResponse {
    #[must_use]
    pub fn new(created: usize) -> Self {
        Self {
            message: "Users created successfully".to_string(),
            created,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
