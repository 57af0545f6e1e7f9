//! Account-bound client for the AnyList service.
//!
//! [`AnyListApi`] is the seam the HTTP layer talks through. [`RemoteClient`]
//! implements it over HTTPS; [`FakeClient`] keeps everything in memory.

mod error;
mod fake;
mod models;
mod remote;

pub use error::UpstreamError;
pub use fake::FakeClient;
pub use models::*;
pub use remote::RemoteClient;

use async_trait::async_trait;
use std::fmt::Debug;

#[async_trait]
pub trait AnyListApi: Debug + Send + Sync {
    /// Authenticates the session, reusing cached credentials when possible.
    async fn login(&self) -> Result<(), UpstreamError>;

    async fn get_lists(&self) -> Result<Vec<ShoppingList>, UpstreamError>;

    /// Items previously added to the list, used for category lookup.
    async fn get_recent_items(&self, list_id: &str) -> Result<Vec<RecentItem>, UpstreamError>;

    async fn add_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError>;

    async fn save_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError>;

    async fn remove_item(&self, list_id: &str, item_id: &str) -> Result<(), UpstreamError>;

    async fn get_recipes(&self) -> Result<Vec<Recipe>, UpstreamError>;

    async fn get_recipe_collections(&self) -> Result<Vec<RecipeCollection>, UpstreamError>;

    /// Creates or replaces a recipe keyed by its identifier.
    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), UpstreamError>;

    async fn delete_recipe(&self, recipe_id: &str) -> Result<(), UpstreamError>;

    async fn save_event(&self, event: &MealPlanEvent) -> Result<(), UpstreamError>;
}
