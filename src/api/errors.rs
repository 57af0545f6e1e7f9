use crate::anylist::UpstreamError;
use crate::constants::{
    INTERNAL_ERROR_MESSAGE, RATE_LIMIT_KEYWORDS, RATE_LIMIT_MESSAGE, RATE_LIMIT_RETRY_AFTER_SECS,
    RECIPE_NOT_FOUND,
};
use crate::service::OperationError;
use crate::validation::ValidationErrors;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// Error returned by every handler
#[derive(Debug, PartialEq)]
pub enum ApiError {
    /// `{ "error": message }` with the given status
    Message { code: StatusCode, message: String },
    /// 422 with one message per violated rule
    Validation(Vec<String>),
    /// 429 with a retry hint
    RateLimited,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitBody {
    error: &'static str,
    retry_after: u64,
}

impl ApiError {
    pub fn code(&self) -> StatusCode {
        match self {
            ApiError::Message { code, .. } => *code,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Message { code, message } => write!(f, "ApiError({}, {})", code, message),
            ApiError::Validation(errors) => write!(f, "ApiError(422, {})", errors.join("; ")),
            ApiError::RateLimited => write!(f, "ApiError(429, {})", RATE_LIMIT_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Message { code, message } => {
                (code, Json(MessageBody { error: &message })).into_response()
            }
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { errors: &errors }),
            )
                .into_response(),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, RATE_LIMIT_RETRY_AFTER_SECS.to_string())],
                Json(RateLimitBody {
                    error: RATE_LIMIT_MESSAGE,
                    retry_after: RATE_LIMIT_RETRY_AFTER_SECS,
                }),
            )
                .into_response(),
        }
    }
}

/// Helper function to create API errors
pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    ApiError::Message {
        code: status,
        message: message.to_string(),
    }
}

/// Returns true when the upstream failure signals rate limiting.
pub fn is_rate_limit_error(err: &UpstreamError) -> bool {
    if err.status_code() == Some(429) {
        return true;
    }
    let message = err.message().to_lowercase();
    RATE_LIMIT_KEYWORDS.iter().any(|k| message.contains(k))
}

/// Maps an upstream failure to the response sent to the caller.
///
/// Rate limiting becomes 429, upstream client errors (4xx) are forwarded
/// with their message, and everything else is a generic 500.
pub fn classify_upstream(err: &UpstreamError) -> ApiError {
    if is_rate_limit_error(err) {
        warn!("AnyList rate limit hit: {}", err);
        return ApiError::RateLimited;
    }

    match err.status_code() {
        Some(status) if (400..500).contains(&status) => {
            warn!("AnyList rejected request ({}): {}", status, err);
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
            api_error(code, &err.message())
        }
        _ => {
            error!("AnyList request failed: {}", err);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::ListNotFound | OperationError::ItemNotFound => {
                api_error(StatusCode::BAD_REQUEST, &err.to_string())
            }
            OperationError::RecipeNotFound => api_error(StatusCode::NOT_FOUND, RECIPE_NOT_FOUND),
            OperationError::Upstream(e) => classify_upstream(&e),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.into_messages())
    }
}
