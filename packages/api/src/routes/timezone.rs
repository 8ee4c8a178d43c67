use axum::{
    body::Bytes,
    extract::State,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use shared::models::timezone::requests::{FetchUserRequest, SaveTimezoneRequest};
use shared::models::timezone::responses::{MessageResponse, TIMEZONE_SAVED};
use shared::services::errors::user_service_errors::UserServiceError;
use shared::services::user_service::UserService;
use shared::timezones::canonical_timezones;
use tracing::{debug, error, info, warn};

use crate::{
    error::ApiError, middleware::connection::require_store, routes::method_not_allowed,
    state::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/fetchuserinfo",
            post(fetch_user_info)
                .route_layer(from_fn_with_state(state.clone(), require_store))
                .fallback(method_not_allowed),
        )
        .route(
            "/api/settimezone",
            post(set_timezone)
                .route_layer(from_fn_with_state(state, require_store))
                .fallback(method_not_allowed),
        )
        .route("/api/timezones", get(list_timezones).fallback(method_not_allowed))
}

// Bodies are parsed from raw bytes: the page posts JSON without a
// `Content-Type` header.

#[tracing::instrument(skip_all)]
async fn fetch_user_info(
    State(state): State<AppState>,
    Extension(users): Extension<UserService>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: FetchUserRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "couldn't parse fetch user request");
        ApiError::UserNotFound
    })?;

    let user = users.get_user_by_id(&request.uid).await.map_err(|e| {
        error!(uid = %request.uid, error = %e, "couldn't find user");
        ApiError::UserNotFound
    })?;
    debug!(uid = %user.id, "user fetched");

    if state.legacy_double_encoding {
        let encoded = serde_json::to_string(&user).map_err(|e| {
            error!(uid = %user.id, error = %e, "couldn't encode user");
            ApiError::UserNotFound
        })?;
        return Ok(Json(encoded).into_response());
    }

    Ok(Json(user).into_response())
}

#[tracing::instrument(skip_all)]
async fn set_timezone(
    Extension(users): Extension<UserService>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: SaveTimezoneRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "couldn't parse save timezone request");
        ApiError::TimezoneNotSaved
    })?;

    match users.save_timezone(&request.uid, &request.timezone).await {
        Ok(_) => {
            info!(uid = %request.uid, timezone = %request.timezone, "timezone saved");
            Ok(Json(MessageResponse::new(TIMEZONE_SAVED)))
        }
        Err(UserServiceError::InvalidTimezone(timezone)) => {
            warn!(uid = %request.uid, %timezone, "rejected non-canonical timezone");
            Err(ApiError::InvalidTimezone)
        }
        Err(e) => {
            error!(uid = %request.uid, error = %e, "error saving timezone");
            Err(ApiError::TimezoneNotSaved)
        }
    }
}

async fn list_timezones() -> Json<Vec<&'static str>> {
    Json(canonical_timezones())
}
