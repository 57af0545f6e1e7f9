use super::ValidationErrors;
use crate::constants::MEAL_TYPES;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

pub const RECIPE_ID_INVALID: &str = "Recipe ID is required and must be a non-empty string";
pub const DATE_REQUIRED: &str = "Date is required and must be a string";
pub const DATE_FORMAT_INVALID: &str =
    "Date must be a valid date format (YYYY-MM-DD or ISO string)";
pub const MEAL_TYPE_INVALID: &str =
    "Meal type must be one of: breakfast, lunch, dinner, snack, meal";

/// Validated body of `POST /meal-plan`
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanRequest {
    pub recipe_id: String,
    pub date: NaiveDate,
    pub meal_type: Option<String>,
}

pub fn validate_meal_plan(body: &Map<String, Value>) -> Result<MealPlanRequest, ValidationErrors> {
    let mut errors = Vec::new();

    let recipe_id = match body.get("recipeId") {
        Some(Value::String(id)) if !id.trim().is_empty() => Some(id.clone()),
        _ => {
            errors.push(RECIPE_ID_INVALID.to_string());
            None
        }
    };

    let date = match body.get("date") {
        Some(Value::String(date)) => {
            let parsed = parse_meal_date(date);
            if parsed.is_none() {
                errors.push(DATE_FORMAT_INVALID.to_string());
            }
            parsed
        }
        _ => {
            errors.push(DATE_REQUIRED.to_string());
            None
        }
    };

    let meal_type = match body.get("mealType") {
        None | Some(Value::Null) => None,
        Some(Value::String(meal)) if meal.is_empty() => None,
        Some(Value::String(meal)) if is_meal_type(meal) => Some(meal.clone()),
        Some(_) => {
            errors.push(MEAL_TYPE_INVALID.to_string());
            None
        }
    };

    match (recipe_id, date) {
        (Some(recipe_id), Some(date)) if errors.is_empty() => Ok(MealPlanRequest {
            recipe_id,
            date,
            meal_type,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn is_meal_type(value: &str) -> bool {
    MEAL_TYPES.iter().any(|m| m.eq_ignore_ascii_case(value))
}

/// Parses `YYYY-MM-DD` or an ISO-8601 timestamp beginning with one.
/// Timestamps carrying an offset are converted to their UTC date.
pub fn parse_meal_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes[..10]
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }

    if bytes.len() == 10 {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    }
    if bytes[10] != b'T' {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.date())
}
