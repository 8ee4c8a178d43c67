pub mod health;
pub mod timezone;

use crate::error::ApiError;

/// Replaces axum's empty 405 on routes that accept a single verb.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
