use std::sync::Arc;

use crate::models::user::UserRecord;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::timezones::is_canonical_timezone;

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    validate_timezone: bool,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        UserService {
            repository,
            validate_timezone: true,
        }
    }

    /// When disabled, any timezone string is stored as given.
    pub fn with_timezone_validation(mut self, enabled: bool) -> Self {
        self.validate_timezone = enabled;
        self
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<UserRecord, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn save_timezone(
        &self,
        user_id: &str,
        timezone: &str,
    ) -> Result<UserRecord, UserServiceError> {
        // Unknown users fail the same way whatever timezone they send.
        let mut user = self.get_user_by_id(user_id).await?;

        if self.validate_timezone && !is_canonical_timezone(timezone) {
            return Err(UserServiceError::InvalidTimezone(timezone.to_string()));
        }

        self.repository
            .update_timezone(&user.id, timezone)
            .await
            .map_err(|e| match e {
                // Deleted between the lookup and the write.
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;

        user.timezone = Some(timezone.to_string());
        Ok(user)
    }
}
