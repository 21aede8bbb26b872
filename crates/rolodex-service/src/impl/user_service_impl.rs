//! User service implementation.

use crate::dto::{CreateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use rolodex_core::validation::rules;
use rolodex_core::{NewUser, RolodexError, RolodexResult, User, UserId};
use rolodex_repository::UserRepository;
use rolodex_security::PasswordHasher;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// User service implementation over a repository and a password hasher.
pub struct UserServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Hashes the record's password when one is present.
    fn hash_password(&self, record: &NewUser) -> RolodexResult<Option<String>> {
        record
            .password
            .as_deref()
            .map(|p| self.password_hasher.hash(p))
            .transpose()
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn create_user(&self, request: CreateUserRequest) -> RolodexResult<UserResponse> {
        let record = request.validate().map_err(RolodexError::validation)?;

        debug!("Creating user: {}", record.email);

        if self
            .user_repository
            .exists_by_email(record.email.as_str())
            .await?
        {
            return Err(RolodexError::DuplicateEmail(record.email.to_string()));
        }

        let password_hash = self.hash_password(&record)?;
        let user = User::new(record, password_hash);
        let saved_user = self.user_repository.save(&user).await?;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn create_users_batch(&self, requests: Vec<CreateUserRequest>) -> RolodexResult<usize> {
        debug!("Creating batch of {} users", requests.len());

        // Phase 1: validate every record before writing anything. The
        // first failing record aborts the whole batch.
        let mut records = Vec::with_capacity(requests.len());
        let mut batch_emails = HashSet::new();

        for (index, request) in requests.iter().enumerate() {
            let record = request
                .validate()
                .map_err(|errors| RolodexError::invalid_record(index, errors))?;

            if self
                .user_repository
                .exists_by_email(record.email.as_str())
                .await?
            {
                return Err(RolodexError::invalid_record(
                    index,
                    vec![rules::email_taken()],
                ));
            }

            // An email may appear only once within the batch itself.
            if !batch_emails.insert(record.email.clone()) {
                return Err(RolodexError::invalid_record(
                    index,
                    vec![rules::email_taken()],
                ));
            }

            records.push(record);
        }

        // Phase 2: persist in submission order. A write failure here
        // propagates as-is; records already written stay written.
        let mut created = 0;
        for record in records {
            let password_hash = self.hash_password(&record)?;
            let user = User::new(record, password_hash);
            self.user_repository.save(&user).await?;
            created += 1;
        }

        info!("Batch created {} users", created);
        Ok(created)
    }

    async fn list_users(&self) -> RolodexResult<Vec<UserResponse>> {
        debug!("Listing users");

        let users = self.user_repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user(&self, id: UserId) -> RolodexResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RolodexError::not_found(id))?;

        Ok(UserResponse::from(user))
    }

    async fn update_user(
        &self,
        id: UserId,
        request: CreateUserRequest,
    ) -> RolodexResult<UserResponse> {
        debug!("Updating user: {}", id);

        let record = request.validate().map_err(|errors| {
            // The update body is a single record, not a batch member.
            RolodexError::InvalidRecord {
                index: None,
                errors,
            }
        })?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RolodexError::not_found(id))?;

        // The user may keep their own email; any other holder is a conflict.
        if self
            .user_repository
            .exists_by_email_excluding(record.email.as_str(), id)
            .await?
        {
            return Err(RolodexError::DuplicateEmail(record.email.to_string()));
        }

        let password_hash = self.hash_password(&record)?;
        user.apply_update(record, password_hash);

        let updated_user = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> RolodexResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.user_repository.delete(id).await?;
        if !deleted {
            return Err(RolodexError::not_found(id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl<R: UserRepository> std::fmt::Debug for UserServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
