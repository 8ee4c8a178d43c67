use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::services::user_service::UserService;
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Ensures the users store is connected before the wrapped handler runs, and
/// hands the handler a [`UserService`] bound to that connection.
pub async fn require_store(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let repository = state.connection.repository().await.map_err(|e| {
        error!(error = %e, "couldn't connect to users store");
        ApiError::StoreUnavailable
    })?;

    let users = UserService::new(repository).with_timezone_validation(state.validate_timezone);
    request.extensions_mut().insert(users);

    Ok(next.run(request).await)
}
