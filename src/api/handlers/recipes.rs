use super::parse_object;
use crate::anylist::{Ingredient, Recipe, RecipeCollection};
use crate::api::errors::{api_error, ApiError};
use crate::api::AppState;
use crate::constants::RECIPE_ID_REQUIRED;
use crate::service;
use crate::validation::{validate_collection_param, validate_new_recipe, validate_recipe_update};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub collection: Option<String>,
}

/// Recipe as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub preparation_steps: Vec<String>,
    pub photo_urls: Vec<String>,
    pub cook_time: Option<u64>,
    pub prep_time: Option<u64>,
    pub servings: Option<String>,
    pub rating: Option<u8>,
    pub nutritional_info: Option<String>,
    pub creation_timestamp: Option<f64>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            id: recipe.identifier,
            name: recipe.name,
            note: recipe.note,
            source_name: recipe.source_name,
            source_url: recipe.source_url,
            ingredients: recipe.ingredients,
            preparation_steps: recipe.preparation_steps,
            photo_urls: recipe.photo_urls,
            cook_time: recipe.cook_time,
            prep_time: recipe.prep_time,
            servings: recipe.servings,
            rating: recipe.rating,
            nutritional_info: recipe.nutritional_info,
            creation_timestamp: recipe.creation_timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub id: String,
    pub name: String,
    pub recipe_ids: Vec<String>,
}

impl From<RecipeCollection> for CollectionResponse {
    fn from(collection: RecipeCollection) -> Self {
        CollectionResponse {
            id: collection.identifier,
            name: collection.name,
            recipe_ids: collection.recipe_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionResponse>,
}

#[derive(Debug, Serialize)]
pub struct RecipeIdResponse {
    pub id: String,
}

/// Rejects blank path identifiers.
fn require_recipe_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, RECIPE_ID_REQUIRED));
    }
    Ok(id)
}

/// Lists recipes, optionally filtered by collection name
///
/// # Arguments
/// * `state` - Shared application state
/// * `query` - Optional `collection` filter, matched case-insensitively
///
/// # Returns
/// * `Result<Json<RecipesResponse>, ApiError>` - Matching recipes or error
#[axum::debug_handler]
pub async fn list_recipes(
    Extension(state): Extension<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let collection = validate_collection_param(query.collection.as_deref())?;
    let recipes = service::list_recipes(state.client.as_ref(), collection.as_deref()).await?;
    Ok(Json(RecipesResponse {
        recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
    }))
}

#[axum::debug_handler]
pub async fn get_recipe(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = require_recipe_id(&id)?;
    let recipe = service::get_recipe(state.client.as_ref(), id).await?;
    Ok(Json(recipe.into()))
}

/// Creates a recipe from a validated body and answers 201 with its identifier
#[axum::debug_handler]
pub async fn create_recipe(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeIdResponse>), ApiError> {
    let body = parse_object(payload)?;
    let draft = validate_new_recipe(&body)?;
    let id = service::create_recipe(state.client.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(RecipeIdResponse { id })))
}

/// Applies a partial update to an existing recipe
#[axum::debug_handler]
pub async fn update_recipe(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecipeIdResponse>, ApiError> {
    let id = require_recipe_id(&id)?;
    let body = parse_object(payload)?;
    let patch = validate_recipe_update(&body)?;
    let id = service::update_recipe(state.client.as_ref(), id, patch).await?;
    Ok(Json(RecipeIdResponse { id }))
}

#[axum::debug_handler]
pub async fn delete_recipe(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = require_recipe_id(&id)?;
    service::delete_recipe(state.client.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

/// Returns every recipe collection with the identifiers of its recipes
#[axum::debug_handler]
pub async fn list_collections(
    Extension(state): Extension<AppState>,
) -> Result<Json<CollectionsResponse>, ApiError> {
    let collections = service::list_collections(state.client.as_ref()).await?;
    Ok(Json(CollectionsResponse {
        collections: collections
            .into_iter()
            .map(CollectionResponse::from)
            .collect(),
    }))
}
