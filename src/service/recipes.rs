use super::OperationError;
use crate::anylist::{AnyListApi, Recipe, RecipeCollection};
use crate::validation::{RecipeDraft, RecipePatch};
use chrono::Utc;
use tracing::{info, warn};

/// Lists recipes, optionally restricted to one collection.
///
/// The collection name is matched case-insensitively. An unknown collection
/// yields no recipes. When collections cannot be fetched the unfiltered list
/// is returned.
pub async fn list_recipes(
    client: &dyn AnyListApi,
    collection: Option<&str>,
) -> Result<Vec<Recipe>, OperationError> {
    client.login().await?;
    let recipes = client.get_recipes().await?;

    let Some(collection) = collection else {
        return Ok(recipes);
    };

    let collections = match client.get_recipe_collections().await {
        Ok(collections) => collections,
        Err(e) => {
            warn!("Error filtering by collection '{}': {}", collection, e);
            return Ok(recipes);
        }
    };

    let wanted = collection.to_lowercase();
    let Some(target) = collections
        .into_iter()
        .find(|c| c.name.to_lowercase() == wanted)
    else {
        return Ok(Vec::new());
    };

    Ok(recipes
        .into_iter()
        .filter(|recipe| target.contains(&recipe.identifier))
        .collect())
}

pub async fn list_collections(
    client: &dyn AnyListApi,
) -> Result<Vec<RecipeCollection>, OperationError> {
    client.login().await?;
    Ok(client.get_recipe_collections().await?)
}

pub async fn get_recipe(client: &dyn AnyListApi, recipe_id: &str) -> Result<Recipe, OperationError> {
    client.login().await?;
    client
        .get_recipes()
        .await?
        .into_iter()
        .find(|recipe| recipe.identifier == recipe_id)
        .ok_or(OperationError::RecipeNotFound)
}

/// Creates a recipe and returns its identifier.
pub async fn create_recipe(
    client: &dyn AnyListApi,
    draft: RecipeDraft,
) -> Result<String, OperationError> {
    client.login().await?;

    let mut recipe = Recipe::new(&draft.name);
    recipe.note = draft.note;
    recipe.source_name = draft.source_name;
    recipe.source_url = draft.source_url;
    recipe.ingredients = draft.ingredients;
    recipe.preparation_steps = draft.preparation_steps;
    recipe.photo_urls = draft.photo_urls;
    recipe.cook_time = draft.cook_time;
    recipe.prep_time = draft.prep_time;
    recipe.servings = draft.servings;
    recipe.rating = draft.rating;
    recipe.nutritional_info = draft.nutritional_info;
    recipe.creation_timestamp = Some(Utc::now().timestamp_millis() as f64 / 1000.0);

    client.save_recipe(&recipe).await?;
    info!("Created recipe '{}' ({})", recipe.name, recipe.identifier);
    Ok(recipe.identifier)
}

fn apply_patch(recipe: &mut Recipe, patch: RecipePatch) {
    if let Some(name) = patch.name {
        recipe.name = name;
    }
    if let Some(note) = patch.note {
        recipe.note = note;
    }
    if let Some(source_name) = patch.source_name {
        recipe.source_name = source_name;
    }
    if let Some(source_url) = patch.source_url {
        recipe.source_url = source_url;
    }
    if let Some(ingredients) = patch.ingredients {
        recipe.ingredients = ingredients;
    }
    if let Some(steps) = patch.preparation_steps {
        recipe.preparation_steps = steps;
    }
    if let Some(photo_urls) = patch.photo_urls {
        recipe.photo_urls = photo_urls;
    }
    if let Some(cook_time) = patch.cook_time {
        recipe.cook_time = cook_time;
    }
    if let Some(prep_time) = patch.prep_time {
        recipe.prep_time = prep_time;
    }
    if let Some(servings) = patch.servings {
        recipe.servings = servings;
    }
    if let Some(rating) = patch.rating {
        recipe.rating = rating;
    }
    if let Some(nutritional_info) = patch.nutritional_info {
        recipe.nutritional_info = nutritional_info;
    }
}

/// Applies the fields present in `patch` and saves the recipe.
pub async fn update_recipe(
    client: &dyn AnyListApi,
    recipe_id: &str,
    patch: RecipePatch,
) -> Result<String, OperationError> {
    let mut recipe = get_recipe(client, recipe_id).await?;
    apply_patch(&mut recipe, patch);
    client.save_recipe(&recipe).await?;
    info!("Updated recipe '{}' ({})", recipe.name, recipe.identifier);
    Ok(recipe.identifier)
}

pub async fn delete_recipe(client: &dyn AnyListApi, recipe_id: &str) -> Result<(), OperationError> {
    let recipe = get_recipe(client, recipe_id).await?;
    client.delete_recipe(&recipe.identifier).await?;
    info!("Deleted recipe '{}' ({})", recipe.name, recipe.identifier);
    Ok(())
}
