//! Shared fixtures for the HTTP integration suites

#![allow(dead_code)]

use anylist_rest::anylist::{FakeClient, ListItem, RecentItem, Recipe, RecipeCollection};
use anylist_rest::api::{routes, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Identifiers of the seeded data
pub struct Seeded {
    pub list_id: String,
    pub milk_id: String,
    pub bread_id: String,
}

/// Fake account with one list, three recipes and two collections.
///
/// "Groceries" holds unchecked Milk and checked Bread; Eggs has been bought
/// before under category "dairy". Recipes r1..r3, "Desserts" holds r1 and
/// "Main Dishes" holds r2.
pub fn seeded_client() -> (Arc<FakeClient>, Seeded) {
    let client = FakeClient::new();

    let list_id = client.add_list("Groceries");
    let milk = ListItem::new("Milk");
    let mut bread = ListItem::new("Bread");
    bread.checked = true;
    let seeded = Seeded {
        list_id: list_id.clone(),
        milk_id: milk.identifier.clone(),
        bread_id: bread.identifier.clone(),
    };
    client.push_item(&list_id, milk);
    client.push_item(&list_id, bread);
    client.add_recent_item(
        &list_id,
        RecentItem {
            name: "Eggs".to_string(),
            category_match_id: Some("dairy".to_string()),
        },
    );

    for (id, name) in [("r1", "Chocolate Cake"), ("r2", "Lasagna"), ("r3", "Pancakes")] {
        let mut recipe = Recipe::new(name);
        recipe.identifier = id.to_string();
        client.add_recipe(recipe);
    }
    client.add_collection(RecipeCollection {
        identifier: "c1".to_string(),
        name: "Desserts".to_string(),
        recipe_ids: vec!["r1".to_string()],
    });
    client.add_collection(RecipeCollection {
        identifier: "c2".to_string(),
        name: "Main Dishes".to_string(),
        recipe_ids: vec!["r2".to_string()],
    });

    (Arc::new(client), seeded)
}

pub fn app_for(client: Arc<FakeClient>) -> Router {
    routes::app(AppState::new(client))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// Messages of a 422 response
    pub fn errors(&self) -> Vec<String> {
        self.json()["errors"]
            .as_array()
            .expect("no errors array")
            .iter()
            .map(|e| e.as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn error(&self) -> String {
        self.json()["error"].as_str().unwrap_or_default().to_string()
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to execute request");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}
