//! Repository trait definitions.

use async_trait::async_trait;
use rolodex_core::{RolodexResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RolodexResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> RolodexResult<Option<User>>;

    /// Checks if an email exists.
    async fn exists_by_email(&self, email: &str) -> RolodexResult<bool>;

    /// Checks if an email exists on a user other than the given one.
    ///
    /// Used by updates so a user can keep their own email address.
    async fn exists_by_email_excluding(&self, email: &str, id: UserId) -> RolodexResult<bool>;

    /// Finds all users, newest first.
    async fn find_all(&self) -> RolodexResult<Vec<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> RolodexResult<User>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> RolodexResult<User>;

    /// Deletes a user by ID. Returns `true` when a row was removed.
    async fn delete(&self, id: UserId) -> RolodexResult<bool>;

    /// Counts all users.
    async fn count(&self) -> RolodexResult<u64>;
}
