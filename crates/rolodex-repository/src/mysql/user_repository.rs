//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolodex_core::{Email, RolodexError, RolodexResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    name: String,
    email: String,
    password: Option<String>,
    img: Option<String>,
    last_name: String,
    first_name: String,
    phone: String,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RolodexError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RolodexError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(id),
            name: row.name,
            email: Email::new_unchecked(row.email),
            password_hash: row.password,
            img: row.img,
            last_name: row.last_name,
            first_name: row.first_name,
            phone: row.phone,
            verified: row.verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, password, img, last_name, first_name, phone, \
                            verified, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RolodexResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.into_inner().to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> RolodexResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let query = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?)",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> RolodexResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn exists_by_email_excluding(&self, email: &str, id: UserId) -> RolodexResult<bool> {
        let result: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) AND id != ? LIMIT 1",
        )
        .bind(email)
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn find_all(&self) -> RolodexResult<Vec<User>> {
        debug!("Finding all users");

        let query = format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn save(&self, user: &User) -> RolodexResult<User> {
        debug!("Saving new user: {}", user.email);

        let id_str = user.id.into_inner().to_string();

        // MySQL doesn't support RETURNING, so insert then select
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, img, last_name, first_name,
                               phone, verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.img)
        .bind(&user.last_name)
        .bind(&user.first_name)
        .bind(&user.phone)
        .bind(user.verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool.inner())
        .await?;

        // Fetch the inserted row
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RolodexError::Internal("Failed to fetch inserted user".to_string()))
    }

    async fn update(&self, user: &User) -> RolodexResult<User> {
        debug!("Updating user: {}", user.id);

        let id_str = user.id.into_inner().to_string();

        // MySQL doesn't support RETURNING, so update then select
        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, password = ?, img = ?, last_name = ?,
                first_name = ?, phone = ?, verified = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.img)
        .bind(&user.last_name)
        .bind(&user.first_name)
        .bind(&user.phone)
        .bind(user.verified)
        .bind(user.updated_at)
        .bind(&id_str)
        .execute(self.pool.inner())
        .await?;

        // Fetch the updated row
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RolodexError::Internal("Failed to fetch updated user".to_string()))
    }

    async fn delete(&self, id: UserId) -> RolodexResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RolodexResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
