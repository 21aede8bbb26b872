//! User service trait definition.

use crate::dto::{CreateUserRequest, UserResponse};
use async_trait::async_trait;
use rolodex_core::{RolodexResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user from a single request.
    async fn create_user(&self, request: CreateUserRequest) -> RolodexResult<UserResponse>;

    /// Creates a batch of users atomically with respect to validation.
    ///
    /// Every record is validated (schema plus email uniqueness, including
    /// uniqueness within the batch itself) before anything is written.
    /// Returns the number of users created.
    async fn create_users_batch(&self, requests: Vec<CreateUserRequest>) -> RolodexResult<usize>;

    /// Lists all users, newest first.
    async fn list_users(&self) -> RolodexResult<Vec<UserResponse>>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> RolodexResult<UserResponse>;

    /// Replaces a user's record with the given request.
    async fn update_user(
        &self,
        id: UserId,
        request: CreateUserRequest,
    ) -> RolodexResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RolodexResult<()>;
}
