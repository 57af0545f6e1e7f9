use super::{is_non_empty_string, is_valid_url, non_null, present, ValidationErrors};
use crate::anylist::Ingredient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const NAME_REQUIRED: &str = "Recipe name is required and must be a non-empty string";
pub const NAME_INVALID: &str = "Recipe name must be a non-empty string";
pub const COOK_TIME_INVALID: &str = "Cook time must be a non-negative integer";
pub const PREP_TIME_INVALID: &str = "Prep time must be a non-negative integer";
pub const RATING_INVALID: &str = "Rating must be an integer between 1 and 5";
pub const INGREDIENTS_NOT_ARRAY: &str = "Ingredients must be an array";
pub const STEPS_NOT_ARRAY: &str = "Preparation steps must be an array";
pub const SOURCE_URL_INVALID: &str = "Source URL must be a valid URL format";
pub const PHOTO_URLS_NOT_ARRAY: &str = "Photo URLs must be an array";

/// Free-text fields and the label used in their messages
const TEXT_FIELDS: [(&str, &str); 4] = [
    ("note", "Note"),
    ("sourceName", "Source name"),
    ("servings", "Servings"),
    ("nutritionalInfo", "Nutritional info"),
];

/// Validated body of `POST /recipes`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub preparation_steps: Vec<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub cook_time: Option<u64>,
    #[serde(default)]
    pub prep_time: Option<u64>,
    #[serde(default)]
    pub servings: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub nutritional_info: Option<String>,
}

/// Validated body of `PUT /recipes/:id`.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub source_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub source_url: Option<Option<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub preparation_steps: Option<Vec<String>>,
    #[serde(default)]
    pub photo_urls: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cook_time: Option<Option<u64>>,
    #[serde(default, deserialize_with = "present")]
    pub prep_time: Option<Option<u64>>,
    #[serde(default, deserialize_with = "present")]
    pub servings: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Option<u8>>,
    #[serde(default, deserialize_with = "present")]
    pub nutritional_info: Option<Option<String>>,
}

/// Validates a recipe creation body.
///
/// # Arguments
/// * `body` - JSON object sent by the client
///
/// # Returns
/// * `Result<RecipeDraft, ValidationErrors>` - Typed recipe or every violation found
pub fn validate_new_recipe(body: &Map<String, Value>) -> Result<RecipeDraft, ValidationErrors> {
    let mut errors = Vec::new();
    if !is_non_empty_string(body.get("name")) {
        errors.push(NAME_REQUIRED.to_string());
    }
    check_recipe_fields(body, &mut errors);
    finish(body, errors)
}

/// Validates a partial recipe update. Only fields present in `body` are checked.
pub fn validate_recipe_update(body: &Map<String, Value>) -> Result<RecipePatch, ValidationErrors> {
    let mut errors = Vec::new();
    if body.contains_key("name") && !is_non_empty_string(body.get("name")) {
        errors.push(NAME_INVALID.to_string());
    }
    check_recipe_fields(body, &mut errors);
    finish(body, errors)
}

fn finish<T: DeserializeOwned>(
    body: &Map<String, Value>,
    errors: Vec<String>,
) -> Result<T, ValidationErrors> {
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    serde_json::from_value(Value::Object(body.clone()))
        .map_err(|e| ValidationErrors(vec![e.to_string()]))
}

fn check_recipe_fields(body: &Map<String, Value>, errors: &mut Vec<String>) {
    for (key, message) in [("cookTime", COOK_TIME_INVALID), ("prepTime", PREP_TIME_INVALID)] {
        if let Some(value) = non_null(body, key) {
            if value.as_u64().is_none() {
                errors.push(message.to_string());
            }
        }
    }

    if let Some(rating) = non_null(body, "rating") {
        if !rating.as_u64().is_some_and(|r| (1..=5).contains(&r)) {
            errors.push(RATING_INVALID.to_string());
        }
    }

    if let Some(ingredients) = body.get("ingredients") {
        check_ingredients(ingredients, errors);
    }

    if let Some(steps) = body.get("preparationSteps") {
        match steps.as_array() {
            Some(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if !is_non_empty_string(Some(step)) {
                        errors.push(format!("Preparation step {}: must be a non-empty string", i + 1));
                    }
                }
            }
            None => errors.push(STEPS_NOT_ARRAY.to_string()),
        }
    }

    match non_null(body, "sourceUrl") {
        None => {}
        Some(Value::String(url)) if url.is_empty() || is_valid_url(url) => {}
        Some(_) => errors.push(SOURCE_URL_INVALID.to_string()),
    }

    if let Some(photos) = body.get("photoUrls") {
        match photos.as_array() {
            Some(photos) => {
                for (i, photo) in photos.iter().enumerate() {
                    if !photo.as_str().is_some_and(is_valid_url) {
                        errors.push(format!("Photo URL {}: must be a valid URL format", i + 1));
                    }
                }
            }
            None => errors.push(PHOTO_URLS_NOT_ARRAY.to_string()),
        }
    }

    for (key, label) in TEXT_FIELDS {
        if let Some(value) = non_null(body, key) {
            if !value.is_string() {
                errors.push(format!("{} must be a string", label));
            }
        }
    }
}

fn check_ingredients(ingredients: &Value, errors: &mut Vec<String>) {
    let Some(ingredients) = ingredients.as_array() else {
        errors.push(INGREDIENTS_NOT_ARRAY.to_string());
        return;
    };

    for (i, ingredient) in ingredients.iter().enumerate() {
        let n = i + 1;
        let Some(fields) = ingredient.as_object() else {
            errors.push(format!("Ingredient {}: must be an object", n));
            continue;
        };
        if !is_non_empty_string(fields.get("name")) {
            errors.push(format!(
                "Ingredient {}: name is required and must be a non-empty string",
                n
            ));
        }
        for key in ["quantity", "unit"] {
            if let Some(value) = non_null(fields, key) {
                if !value.is_string() {
                    errors.push(format!("Ingredient {}: {} must be a string", n, key));
                }
            }
        }
    }
}
