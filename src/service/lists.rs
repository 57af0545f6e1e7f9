use super::{OperationError, Outcome};
use crate::anylist::{AnyListApi, ItemUpdates, ListItem, ShoppingList};
use tracing::{debug, info};

/// How an item to remove is designated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Name(String),
    Id(String),
}

/// Returns the names of every shopping list on the account.
pub async fn list_names(client: &dyn AnyListApi) -> Result<Vec<String>, OperationError> {
    client.login().await?;
    let lists = client.get_lists().await?;
    Ok(lists.into_iter().map(|list| list.name).collect())
}

async fn find_list(client: &dyn AnyListApi, list_name: &str) -> Result<ShoppingList, OperationError> {
    client.login().await?;
    client
        .get_lists()
        .await?
        .into_iter()
        .find(|list| list.matches_name(list_name))
        .ok_or(OperationError::ListNotFound)
}

pub async fn list_items(
    client: &dyn AnyListApi,
    list_name: &str,
) -> Result<Vec<ListItem>, OperationError> {
    let list = find_list(client, list_name).await?;
    Ok(list.items)
}

/// Looks up the category an item was last filed under on this list.
async fn lookup_item_category(
    client: &dyn AnyListApi,
    list_id: &str,
    item_name: &str,
) -> Result<Option<String>, OperationError> {
    let recent = client.get_recent_items(list_id).await?;
    Ok(recent
        .into_iter()
        .find(|item| item.name.to_lowercase() == item_name.to_lowercase())
        .and_then(|item| item.category_match_id))
}

/// Adds an item, or re-activates it when it is already on the list but checked off.
///
/// # Arguments
/// * `client` - Upstream client
/// * `list_name` - Target list, matched case-insensitively
/// * `item_name` - Exact item name
/// * `updates` - Fields applied to the new or re-activated item
///
/// # Returns
/// * `Outcome::Unchanged` when the item is already on the list unchecked
pub async fn add_item(
    client: &dyn AnyListApi,
    list_name: &str,
    item_name: &str,
    updates: &ItemUpdates,
) -> Result<Outcome, OperationError> {
    let list = find_list(client, list_name).await?;

    match list.item_by_name(item_name) {
        None => {
            let category = lookup_item_category(client, &list.identifier, item_name).await?;
            let mut item = ListItem::new(item_name).with_category(category);
            updates.apply(&mut item);
            item.checked = false;
            client.add_item(&list.identifier, &item).await?;
            info!("Added '{}' to list '{}'", item_name, list.name);
            Ok(Outcome::Changed)
        }
        Some(existing) if existing.checked => {
            let mut item = existing.clone();
            updates.apply(&mut item);
            item.checked = false;
            client.save_item(&list.identifier, &item).await?;
            info!("Unchecked '{}' on list '{}'", item_name, list.name);
            Ok(Outcome::Changed)
        }
        Some(_) => {
            debug!("'{}' is already on list '{}'", item_name, list.name);
            Ok(Outcome::Unchanged)
        }
    }
}

pub async fn remove_item(
    client: &dyn AnyListApi,
    list_name: &str,
    selector: &ItemSelector,
) -> Result<Outcome, OperationError> {
    let list = find_list(client, list_name).await?;

    let item = match selector {
        ItemSelector::Name(name) => list.item_by_name(name),
        ItemSelector::Id(id) => list.item_by_id(id),
    };

    match item {
        Some(item) => {
            client.remove_item(&list.identifier, &item.identifier).await?;
            info!("Removed '{}' from list '{}'", item.name, list.name);
            Ok(Outcome::Changed)
        }
        None => Ok(Outcome::Unchanged),
    }
}

pub async fn update_item(
    client: &dyn AnyListApi,
    list_name: &str,
    item_id: &str,
    updates: &ItemUpdates,
) -> Result<Outcome, OperationError> {
    let list = find_list(client, list_name).await?;
    let mut item = list
        .item_by_id(item_id)
        .cloned()
        .ok_or(OperationError::ItemNotFound)?;

    updates.apply(&mut item);
    client.save_item(&list.identifier, &item).await?;
    Ok(Outcome::Changed)
}

pub async fn check_item(
    client: &dyn AnyListApi,
    list_name: &str,
    item_name: &str,
    checked: bool,
) -> Result<Outcome, OperationError> {
    let list = find_list(client, list_name).await?;
    let mut item = list
        .item_by_name(item_name)
        .cloned()
        .ok_or(OperationError::ItemNotFound)?;

    if item.checked == checked {
        return Ok(Outcome::Unchanged);
    }

    item.checked = checked;
    client.save_item(&list.identifier, &item).await?;
    Ok(Outcome::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anylist::{FakeClient, RecentItem};

    fn groceries() -> (FakeClient, String) {
        let client = FakeClient::new();
        let list_id = client.add_list("Groceries");
        (client, list_id)
    }

    fn items(client: &FakeClient) -> Vec<ListItem> {
        client.lists().remove(0).items
    }

    #[tokio::test]
    async fn new_item_gets_category_from_recent_items() {
        let (client, list_id) = groceries();
        client.add_recent_item(
            &list_id,
            RecentItem {
                name: "milk".to_string(),
                category_match_id: Some("dairy".to_string()),
            },
        );

        let updates = ItemUpdates {
            notes: Some(Some("2%".to_string())),
            checked: Some(true),
            ..Default::default()
        };
        let outcome = add_item(&client, "groceries", "Milk", &updates).await.unwrap();

        assert_eq!(outcome, Outcome::Changed);
        let items = items(&client);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category_match_id.as_deref(), Some("dairy"));
        assert_eq!(items[0].details.as_deref(), Some("2%"));
        assert!(!items[0].checked);
    }

    #[tokio::test]
    async fn adding_checked_item_unchecks_it() {
        let (client, list_id) = groceries();
        let mut eggs = ListItem::new("Eggs");
        eggs.checked = true;
        client.push_item(&list_id, eggs);

        let outcome = add_item(&client, "Groceries", "Eggs", &ItemUpdates::default())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Changed);
        assert!(!items(&client)[0].checked);
    }

    #[tokio::test]
    async fn adding_unchecked_item_is_a_no_op() {
        let (client, list_id) = groceries();
        client.push_item(&list_id, ListItem::new("Eggs"));

        let outcome = add_item(&client, "Groceries", "Eggs", &ItemUpdates::default())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(items(&client).len(), 1);
    }

    #[tokio::test]
    async fn unknown_list_is_reported() {
        let (client, _) = groceries();
        let err = add_item(&client, "Hardware", "Nails", &ItemUpdates::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::ListNotFound));
    }

    #[tokio::test]
    async fn remove_by_name_or_id() {
        let (client, list_id) = groceries();
        let bread = ListItem::new("Bread");
        let bread_id = bread.identifier.clone();
        client.push_item(&list_id, bread);
        client.push_item(&list_id, ListItem::new("Jam"));

        let by_id = remove_item(&client, "Groceries", &ItemSelector::Id(bread_id.clone()))
            .await
            .unwrap();
        assert_eq!(by_id, Outcome::Changed);

        let again = remove_item(&client, "Groceries", &ItemSelector::Id(bread_id))
            .await
            .unwrap();
        assert_eq!(again, Outcome::Unchanged);

        let by_name = remove_item(&client, "Groceries", &ItemSelector::Name("Jam".to_string()))
            .await
            .unwrap();
        assert_eq!(by_name, Outcome::Changed);
        assert!(items(&client).is_empty());
    }

    #[tokio::test]
    async fn check_reports_unchanged_state() {
        let (client, list_id) = groceries();
        client.push_item(&list_id, ListItem::new("Rice"));

        assert_eq!(
            check_item(&client, "Groceries", "Rice", false).await.unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            check_item(&client, "Groceries", "Rice", true).await.unwrap(),
            Outcome::Changed
        );
        assert!(items(&client)[0].checked);
    }

    #[tokio::test]
    async fn update_requires_existing_item() {
        let (client, list_id) = groceries();
        let rice = ListItem::new("Rice");
        let rice_id = rice.identifier.clone();
        client.push_item(&list_id, rice);

        let updates = ItemUpdates {
            name: Some("Basmati rice".to_string()),
            ..Default::default()
        };
        update_item(&client, "Groceries", &rice_id, &updates)
            .await
            .unwrap();
        assert_eq!(items(&client)[0].name, "Basmati rice");

        let err = update_item(&client, "Groceries", "missing", &updates)
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::ItemNotFound));
    }
}
