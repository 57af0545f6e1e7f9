//! API routes configuration module

use crate::api::handlers::{lists, meal_plan, recipes};
use crate::api::middleware::enforce_request_source;
use crate::api::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `state` - Upstream client and settings shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and the IP filter
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/lists", get(lists::get_lists))
        .route("/items", get(lists::get_items))
        .route("/add", post(lists::add_item))
        .route("/remove", post(lists::remove_item))
        .route("/update", post(lists::update_item))
        .route("/check", post(lists::check_item))
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipe-collections", get(recipes::list_collections))
        .route("/meal-plan", post(meal_plan::add_to_meal_plan))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_request_source,
        ))
        .layer(Extension(state))
}
