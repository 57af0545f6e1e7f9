use super::parse_object;
use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::service;
use crate::validation::validate_meal_plan;
use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub event_id: String,
}

/// Adds a recipe to the meal plan
///
/// # Arguments
/// * `state` - Shared application state
/// * `payload` - `{ recipeId, date, mealType? }`
///
/// # Returns
/// * `Result<(StatusCode, Json<MealPlanResponse>), ApiError>` - 201 with the event id, or error
#[axum::debug_handler]
pub async fn add_to_meal_plan(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MealPlanResponse>), ApiError> {
    let body = parse_object(payload)?;
    let request = validate_meal_plan(&body)?;
    let event_id = service::add_to_meal_plan(state.client.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(MealPlanResponse { event_id })))
}
