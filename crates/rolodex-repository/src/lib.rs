//! # Rolodex Repository
//!
//! Data access for the user directory:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! MySqlUserRepository           (MySQL / SQLx)
//!   ↓
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::MySqlUserRepository;
pub use pool::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rolodex_core::{Email, NewUser, RolodexResult, User, UserId};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory mock repository for testing.
    struct InMemoryUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    impl InMemoryUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        fn with_users(users: Vec<User>) -> Self {
            let repo = Self::new();
            for user in users {
                repo.users.lock().unwrap().insert(user.id, user);
            }
            repo
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_id(&self, id: UserId) -> RolodexResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> RolodexResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email.as_str().eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn exists_by_email(&self, email: &str) -> RolodexResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .any(|u| u.email.as_str().eq_ignore_ascii_case(email)))
        }

        async fn exists_by_email_excluding(&self, email: &str, id: UserId) -> RolodexResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .any(|u| u.email.as_str().eq_ignore_ascii_case(email) && u.id != id))
        }

        async fn find_all(&self) -> RolodexResult<Vec<User>> {
            let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(users)
        }

        async fn save(&self, user: &User) -> RolodexResult<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn update(&self, user: &User) -> RolodexResult<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> RolodexResult<bool> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }

        async fn count(&self) -> RolodexResult<u64> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
    }

    fn create_test_user(first_name: &str, email: &str) -> User {
        User::new(
            NewUser {
                email: Email::new_unchecked(email),
                last_name: "Tester".to_string(),
                first_name: first_name.to_string(),
                phone: "+33123456789".to_string(),
                verified: false,
                password: None,
                img: None,
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("Alice", "alice@example.com");
        let user_id = user.id;

        repo.save(&user).await.unwrap();

        let found = repo.find_by_id(user_id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().first_name, "Alice");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();
        let result = repo.find_by_id(UserId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let user = create_test_user("Alice", "alice@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user]);

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().first_name, "Alice");
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let user = create_test_user("Alice", "alice@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user]);

        assert!(repo.exists_by_email("alice@example.com").await.unwrap());
        assert!(!repo.exists_by_email("nobody@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_email_case_insensitive() {
        let user = create_test_user("Alice", "alice@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user]);

        assert!(repo.exists_by_email("ALICE@EXAMPLE.COM").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_email_excluding_own_record() {
        let user = create_test_user("Alice", "alice@example.com");
        let user_id = user.id;
        let other = create_test_user("Bob", "bob@example.com");
        let repo = InMemoryUserRepository::with_users(vec![user, other]);

        // A user keeping their own email is not a conflict.
        assert!(!repo
            .exists_by_email_excluding("alice@example.com", user_id)
            .await
            .unwrap());
        // Another user's email is.
        assert!(repo
            .exists_by_email_excluding("bob@example.com", user_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let repo = InMemoryUserRepository::new();
        let users = repo.find_all().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_with_users() {
        let users = vec![
            create_test_user("Alice", "alice@example.com"),
            create_test_user("Bob", "bob@example.com"),
            create_test_user("Carol", "carol@example.com"),
        ];
        let repo = InMemoryUserRepository::with_users(users);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_user() {
        let mut user = create_test_user("Alice", "alice@example.com");
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);

        user.phone = "+33699999999".to_string();
        repo.update(&user).await.unwrap();

        let found = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(found.phone, "+33699999999");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let user = create_test_user("Alice", "alice@example.com");
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_users(vec![user]);

        let deleted = repo.delete(user_id).await.unwrap();
        assert!(deleted);
        assert!(repo.find_by_id(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_user() {
        let repo = InMemoryUserRepository::new();
        let deleted = repo.delete(UserId::new()).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_count_users() {
        let users = vec![
            create_test_user("Alice", "alice@example.com"),
            create_test_user("Bob", "bob@example.com"),
        ];
        let repo = InMemoryUserRepository::with_users(users);

        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
