//! Objects exchanged with the upstream AnyList client.
//!
//! Field names follow the upstream's camelCase JSON so the same types serve
//! both the remote client and the in-memory fake.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates an identifier in the upstream's format (hyphenless UUID v4).
pub fn new_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Normalizes a list name for comparison.
pub fn normalize_list_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A shopping list and its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl ShoppingList {
    pub fn new(name: &str) -> Self {
        ShoppingList {
            identifier: new_identifier(),
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    /// Returns true when `name` designates this list, ignoring case and
    /// surrounding whitespace.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_list_name(&self.name) == normalize_list_name(name)
    }

    /// Finds an item by its exact name.
    pub fn item_by_name(&self, name: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn item_by_id(&self, identifier: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.identifier == identifier)
    }
}

/// An entry on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
    /// Free-text notes, exposed as `notes` by the REST API
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub category_match_id: Option<String>,
}

impl ListItem {
    /// Creates an unchecked item with a fresh identifier.
    pub fn new(name: &str) -> Self {
        ListItem {
            identifier: new_identifier(),
            name: name.to_string(),
            checked: false,
            details: None,
            category_match_id: None,
        }
    }

    pub fn with_category(mut self, category_match_id: Option<String>) -> Self {
        self.category_match_id = category_match_id;
        self
    }
}

/// Field changes requested for a list item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdates {
    pub name: Option<String>,
    pub checked: Option<bool>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl ItemUpdates {
    /// Applies every present field to `item`.
    pub fn apply(&self, item: &mut ListItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        if let Some(notes) = &self.notes {
            item.details = notes.clone();
        }
    }
}

/// Previously used item on a list, carrying the category it was filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentItem {
    pub name: String,
    #[serde(default)]
    pub category_match_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub identifier: String,
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
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub creation_timestamp: Option<f64>,
}

impl Recipe {
    /// Creates an empty recipe with a fresh identifier.
    pub fn new(name: &str) -> Self {
        Recipe {
            identifier: new_identifier(),
            name: name.to_string(),
            note: None,
            source_name: None,
            source_url: None,
            ingredients: Vec::new(),
            preparation_steps: Vec::new(),
            photo_urls: Vec::new(),
            cook_time: None,
            prep_time: None,
            servings: None,
            rating: None,
            nutritional_info: None,
            creation_timestamp: None,
        }
    }
}

/// Named grouping of recipes, referenced by identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCollection {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

impl RecipeCollection {
    pub fn contains(&self, recipe_id: &str) -> bool {
        self.recipe_ids.iter().any(|id| id == recipe_id)
    }
}

/// Calendar entry associating a recipe with a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEvent {
    pub identifier: String,
    pub recipe_id: String,
    pub date: NaiveDate,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_hyphenless_hex() {
        let id = new_identifier();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_identifier());
    }

    #[test]
    fn list_names_match_ignoring_case_and_whitespace() {
        let list = ShoppingList::new("Groceries");
        assert!(list.matches_name("  groceries "));
        assert!(list.matches_name("GROCERIES"));
        assert!(!list.matches_name("Hardware"));
    }

    #[test]
    fn item_lookup_by_name_is_exact() {
        let mut list = ShoppingList::new("Groceries");
        list.items.push(ListItem::new("Milk"));
        assert!(list.item_by_name("Milk").is_some());
        assert!(list.item_by_name("milk").is_none());
    }

    #[test]
    fn updates_only_touch_present_fields() {
        let mut item = ListItem::new("Eggs");
        item.details = Some("free range".to_string());

        ItemUpdates {
            checked: Some(true),
            ..Default::default()
        }
        .apply(&mut item);

        assert!(item.checked);
        assert_eq!(item.name, "Eggs");
        assert_eq!(item.details.as_deref(), Some("free range"));
    }

    #[test]
    fn null_notes_clear_details() {
        let mut item = ListItem::new("Eggs");
        item.details = Some("free range".to_string());

        ItemUpdates {
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut item);

        assert_eq!(item.details, None);
    }

    #[test]
    fn recipe_deserializes_with_missing_optional_fields() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"identifier":"abc","name":"Soup"}"#).unwrap();
        assert_eq!(recipe.name, "Soup");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.rating, None);
    }
}
