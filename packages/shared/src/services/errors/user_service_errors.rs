use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}
