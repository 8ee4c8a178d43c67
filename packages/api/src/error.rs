use axum::{
    http::StatusCode,
    BoxError,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::timezone::responses::{
    MessageResponse, INVALID_TIMEZONE, METHOD_NOT_ALLOWED, REQUEST_TIMED_OUT,
    SERVICE_UNAVAILABLE, TIMEZONE_NOT_SAVED, USER_NOT_FOUND,
};
use tracing::{error, warn};

/// Failures surfaced to callers. Each maps to a static message; causes are
/// logged where they occur and never echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    MethodNotAllowed,
    StoreUnavailable,
    /// Any failure of the fetch-user endpoint.
    UserNotFound,
    /// Any failure of the save-timezone endpoint.
    TimezoneNotSaved,
    InvalidTimezone,
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UserNotFound | ApiError::TimezoneNotSaved => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidTimezone => StatusCode::BAD_REQUEST,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            ApiError::StoreUnavailable => SERVICE_UNAVAILABLE,
            ApiError::UserNotFound => USER_NOT_FOUND,
            ApiError::TimezoneNotSaved => TIMEZONE_NOT_SAVED,
            ApiError::InvalidTimezone => INVALID_TIMEZONE,
            ApiError::Timeout => REQUEST_TIMED_OUT,
        }
    }
}

/// Turns errors raised by the middleware stack into a `{message}` reply.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        return ApiError::Timeout;
    }
    error!(error = %err, "unhandled middleware error");
    ApiError::StoreUnavailable
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.message()))).into_response()
    }
}
