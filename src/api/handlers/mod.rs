pub mod lists;
pub mod meal_plan;
pub mod recipes;

use crate::api::errors::{api_error, ApiError};
use crate::constants::BODY_NOT_OBJECT;
use crate::service::Outcome;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use tracing::debug;

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(api_error(StatusCode::BAD_REQUEST, &rejection.body_text()))
        }
    }
}

/// Like [`parse_body`] but requires the body to be a JSON object.
fn parse_object(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    match parse_body(payload)? {
        Value::Object(body) => Ok(body),
        _ => Err(api_error(StatusCode::BAD_REQUEST, BODY_NOT_OBJECT)),
    }
}

fn outcome_status(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::Changed => StatusCode::OK,
        Outcome::Unchanged => StatusCode::NOT_MODIFIED,
    }
}
