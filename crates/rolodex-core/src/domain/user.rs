//! User entity and its normalized input record.

use super::email::Email;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated user record, ready to be persisted.
///
/// Produced by the field validator from raw request input; every required
/// field is present and within bounds. `password` is still plaintext here —
/// the writer hashes it before it reaches storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub verified: bool,
    pub password: Option<String>,
    pub img: Option<String>,
}

/// User entity as persisted in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name, always derived from `first_name` and `last_name`.
    pub name: String,

    /// User's email address (unique across the directory).
    pub email: Email,

    /// Argon2 password hash, or `None` when no password has been set
    /// (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    /// Profile image URL.
    pub img: Option<String>,

    /// User's last name.
    pub last_name: String,

    /// User's first name.
    pub first_name: String,

    /// Contact phone number.
    pub phone: String,

    /// Whether the user has been verified.
    pub verified: bool,

    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user from a normalized record and an already-hashed
    /// password (or `None` when the record carried no password).
    #[must_use]
    pub fn new(record: NewUser, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: derive_name(&record.first_name, &record.last_name),
            email: record.email,
            password_hash,
            img: record.img,
            last_name: record.last_name,
            first_name: record.first_name,
            phone: record.phone,
            verified: record.verified,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a full-record update.
    ///
    /// `password_hash` is `Some` only when the update supplied a new
    /// password; `None` keeps the existing credential untouched. The
    /// display name is re-derived — any `name` supplied by the caller is
    /// ignored.
    pub fn apply_update(&mut self, record: NewUser, password_hash: Option<String>) {
        self.name = derive_name(&record.first_name, &record.last_name);
        self.email = record.email;
        self.img = record.img;
        self.last_name = record.last_name;
        self.first_name = record.first_name;
        self.phone = record.phone;
        self.verified = record.verified;
        if let Some(hash) = password_hash {
            self.password_hash = Some(hash);
        }
        self.updated_at = Utc::now();
    }

    /// Checks whether the user has a password credential set.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Derives the display name from the name parts.
#[must_use]
pub fn derive_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}
