use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::user::UserRecord;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;

/// Process-local users collection, used by tests and `memory://` stores.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the collection with `users`; a later record replaces an earlier
    /// one with the same id.
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &UserRecord) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<UserRecord, UserRepositoryError> {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn update_timezone(
        &self,
        user_id: &str,
        timezone: &str,
    ) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(UserRepositoryError::NotFound)?;
        user.timezone = Some(timezone.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn alice() -> UserRecord {
        UserRecord {
            id: "u1".to_string(),
            username: "alice".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            timezone: None,
            profile_picture_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&alice()).await.unwrap();

        let found = repo.get_user_by_id("u1").await.unwrap();
        assert_eq!(found, alice());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_with_users_is_readable_and_writable() {
        let mut bob = alice();
        bob.id = "u2".to_string();
        bob.username = "bob".to_string();
        let repo = InMemoryUserRepository::with_users(vec![alice(), bob]);

        assert_eq!(repo.len().await, 2);
        assert_eq!(repo.get_user_by_id("u2").await.unwrap().username, "bob");

        repo.update_timezone("u1", "Asia/Tokyo").await.unwrap();
        let found = repo.get_user_by_id("u1").await.unwrap();
        assert_eq!(found.timezone.as_deref(), Some("Asia/Tokyo"));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&alice()).await.unwrap();

        let result = repo.create_user(&alice()).await;
        assert!(matches!(result, Err(UserRepositoryError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.get_user_by_id("ghost").await;
        assert!(matches!(result, Err(UserRepositoryError::NotFound)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_timezone_only_touches_timezone() {
        let repo = InMemoryUserRepository::new();
        let original = alice();
        repo.create_user(&original).await.unwrap();

        repo.update_timezone("u1", "Europe/Paris").await.unwrap();

        let found = repo.get_user_by_id("u1").await.unwrap();
        assert_eq!(found.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(found.username, original.username);
        assert_eq!(found.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_timezone_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update_timezone("ghost", "Europe/Paris").await;
        assert!(matches!(result, Err(UserRepositoryError::NotFound)));
        assert!(repo.is_empty().await);
    }
}
