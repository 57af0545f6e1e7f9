//! In-memory AnyList client.
//!
//! Keeps lists, recipes, collections and meal-plan events in process memory
//! so the HTTP layer can be exercised without network access. Individual
//! operations can be made to fail with [`FakeClient::fail`].

use super::{
    AnyListApi, ListItem, MealPlanEvent, RecentItem, Recipe, RecipeCollection, ShoppingList,
    UpstreamError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct FakeState {
    lists: Vec<ShoppingList>,
    recent_items: HashMap<String, Vec<RecentItem>>,
    recipes: Vec<Recipe>,
    collections: Vec<RecipeCollection>,
    events: Vec<MealPlanEvent>,
    logins: usize,
}

#[derive(Debug, Clone)]
struct Failure {
    status: Option<u16>,
    message: String,
}

#[derive(Debug, Default)]
pub struct FakeClient {
    state: RwLock<FakeState>,
    /// Operation name -> failure to report
    failures: RwLock<HashMap<String, Failure>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, FakeState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, FakeState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes `operation` (an [`AnyListApi`] method name) fail from now on.
    pub fn fail(&self, operation: &str, status: Option<u16>, message: &str) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                operation.to_string(),
                Failure {
                    status,
                    message: message.to_string(),
                },
            );
    }

    fn check(&self, operation: &str) -> Result<(), UpstreamError> {
        let failures = self.failures.read().unwrap_or_else(PoisonError::into_inner);
        match failures.get(operation).cloned() {
            Some(Failure {
                status: Some(status),
                message,
            }) => Err(UpstreamError::Status { status, message }),
            Some(Failure { status: None, message }) => Err(UpstreamError::Other(message)),
            None => Ok(()),
        }
    }

    /// Adds an empty list and returns its identifier.
    pub fn add_list(&self, name: &str) -> String {
        let list = ShoppingList::new(name);
        let identifier = list.identifier.clone();
        self.write().lists.push(list);
        identifier
    }

    /// Puts an item on a list directly, bypassing the API.
    pub fn push_item(&self, list_id: &str, item: ListItem) {
        if let Some(list) = self.write().lists.iter_mut().find(|l| l.identifier == list_id) {
            list.items.push(item);
        }
    }

    pub fn add_recent_item(&self, list_id: &str, item: RecentItem) {
        self.write()
            .recent_items
            .entry(list_id.to_string())
            .or_default()
            .push(item);
    }

    pub fn add_recipe(&self, recipe: Recipe) {
        self.write().recipes.push(recipe);
    }

    pub fn add_collection(&self, collection: RecipeCollection) {
        self.write().collections.push(collection);
    }

    pub fn lists(&self) -> Vec<ShoppingList> {
        self.read().lists.clone()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.read().recipes.clone()
    }

    pub fn events(&self) -> Vec<MealPlanEvent> {
        self.read().events.clone()
    }

    pub fn login_count(&self) -> usize {
        self.read().logins
    }

    fn with_list<T>(
        &self,
        list_id: &str,
        f: impl FnOnce(&mut ShoppingList) -> Result<T, UpstreamError>,
    ) -> Result<T, UpstreamError> {
        let mut state = self.write();
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.identifier == list_id)
            .ok_or_else(|| UpstreamError::status(404, "List not found"))?;
        f(list)
    }
}

#[async_trait]
impl AnyListApi for FakeClient {
    async fn login(&self) -> Result<(), UpstreamError> {
        self.check("login")?;
        self.write().logins += 1;
        Ok(())
    }

    async fn get_lists(&self) -> Result<Vec<ShoppingList>, UpstreamError> {
        self.check("get_lists")?;
        Ok(self.lists())
    }

    async fn get_recent_items(&self, list_id: &str) -> Result<Vec<RecentItem>, UpstreamError> {
        self.check("get_recent_items")?;
        Ok(self
            .read()
            .recent_items
            .get(list_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError> {
        self.check("add_item")?;
        self.with_list(list_id, |list| {
            list.items.push(item.clone());
            Ok(())
        })
    }

    async fn save_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError> {
        self.check("save_item")?;
        self.with_list(list_id, |list| {
            let existing = list
                .items
                .iter_mut()
                .find(|i| i.identifier == item.identifier)
                .ok_or_else(|| UpstreamError::status(404, "Item not found"))?;
            *existing = item.clone();
            Ok(())
        })
    }

    async fn remove_item(&self, list_id: &str, item_id: &str) -> Result<(), UpstreamError> {
        self.check("remove_item")?;
        self.with_list(list_id, |list| {
            list.items.retain(|i| i.identifier != item_id);
            Ok(())
        })
    }

    async fn get_recipes(&self) -> Result<Vec<Recipe>, UpstreamError> {
        self.check("get_recipes")?;
        Ok(self.recipes())
    }

    async fn get_recipe_collections(&self) -> Result<Vec<RecipeCollection>, UpstreamError> {
        self.check("get_recipe_collections")?;
        Ok(self.read().collections.clone())
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), UpstreamError> {
        self.check("save_recipe")?;
        let mut state = self.write();
        match state
            .recipes
            .iter()
            .position(|r| r.identifier == recipe.identifier)
        {
            Some(index) => state.recipes[index] = recipe.clone(),
            None => state.recipes.push(recipe.clone()),
        }
        Ok(())
    }

    async fn delete_recipe(&self, recipe_id: &str) -> Result<(), UpstreamError> {
        self.check("delete_recipe")?;
        self.write().recipes.retain(|r| r.identifier != recipe_id);
        Ok(())
    }

    async fn save_event(&self, event: &MealPlanEvent) -> Result<(), UpstreamError> {
        self.check("save_event")?;
        self.write().events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn injected_failures_carry_status() {
        let client = FakeClient::new();
        client.fail("get_recipes", Some(429), "Too many requests");

        let err = client.get_recipes().await.unwrap_err();
        assert_eq!(err.status_code(), Some(429));
        assert!(client.get_lists().await.is_ok());
    }

    #[tokio::test]
    async fn save_recipe_replaces_existing() {
        let client = FakeClient::new();
        let mut recipe = Recipe::new("Soup");
        client.save_recipe(&recipe).await.unwrap();

        recipe.name = "Stew".to_string();
        client.save_recipe(&recipe).await.unwrap();

        let recipes = client.recipes();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Stew");
    }
}
