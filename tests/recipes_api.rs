mod common;

use axum::http::{header, StatusCode};
use common::{app_for, delete, get, post, put, seeded_client};
use serde_json::json;

fn recipe_names(body: &serde_json::Value) -> Vec<String> {
    let mut names: Vec<String> = body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn lists_all_recipes() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipes").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        recipe_names(&response.json()),
        vec!["Chocolate Cake", "Lasagna", "Pancakes"]
    );
}

#[tokio::test]
async fn collection_filter_ignores_case() {
    let (client, _) = seeded_client();

    let lower = get(app_for(client.clone()), "/recipes?collection=desserts").await;
    let exact = get(app_for(client), "/recipes?collection=Desserts").await;

    assert_eq!(lower.status, StatusCode::OK);
    assert_eq!(recipe_names(&lower.json()), vec!["Chocolate Cake"]);
    assert_eq!(lower.json(), exact.json());
}

#[tokio::test]
async fn collection_names_with_spaces_are_matched() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipes?collection=main%20dishes").await;
    assert_eq!(recipe_names(&response.json()), vec!["Lasagna"]);
}

#[tokio::test]
async fn unknown_collection_yields_no_recipes() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipes?collection=Breakfast").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "recipes": [] }));
}

#[tokio::test]
async fn blank_collection_parameter_is_rejected() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipes?collection=").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.errors(),
        vec!["Collection parameter must be a non-empty string"]
    );
}

#[tokio::test]
async fn collection_failure_falls_back_to_all_recipes() {
    let (client, _) = seeded_client();
    client.fail("get_recipe_collections", None, "Collections unavailable");

    let response = get(app_for(client), "/recipes?collection=Desserts").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(recipe_names(&response.json()).len(), 3);
}

#[tokio::test]
async fn upstream_failure_is_a_generic_500() {
    let (client, _) = seeded_client();
    client.fail("get_recipes", None, "API Error");

    let response = get(app_for(client), "/recipes").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "Internal server error");
}

#[tokio::test]
async fn rate_limited_upstream_returns_429() {
    let (client, _) = seeded_client();
    client.fail("login", None, "Rate limit exceeded for this account");

    let response = get(app_for(client), "/recipes").await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers[header::RETRY_AFTER], "60");
    assert_eq!(response.json()["retryAfter"], 60);
    assert_eq!(
        response.error(),
        "Rate limit exceeded. Please try again later."
    );
}

#[tokio::test]
async fn upstream_client_errors_are_forwarded() {
    let (client, _) = seeded_client();
    client.fail("get_recipes", Some(401), "Invalid credentials");

    let response = get(app_for(client), "/recipes").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Invalid credentials");
}

#[tokio::test]
async fn gets_recipe_by_id() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipes/r2").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], "r2");
    assert_eq!(body["name"], "Lasagna");
    assert_eq!(body["ingredients"], json!([]));
}

#[tokio::test]
async fn blank_recipe_id_is_a_bad_request() {
    let (client, _) = seeded_client();

    let response = get(app_for(client.clone()), "/recipes/%20").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Recipe ID is required");

    let response = put(app_for(client.clone()), "/recipes/%20%20", json!({ "name": "X" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Recipe ID is required");

    let response = delete(app_for(client), "/recipes/%20").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_recipe_is_404_everywhere() {
    let (client, _) = seeded_client();

    let response = get(app_for(client.clone()), "/recipes/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Recipe not found");

    let response = put(app_for(client.clone()), "/recipes/nope", json!({ "rating": 4 })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = delete(app_for(client), "/recipes/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn creates_recipe() {
    let (client, _) = seeded_client();
    let body = json!({
        "name": "Tomato Soup",
        "ingredients": [{ "name": "Tomatoes", "quantity": "6" }],
        "preparationSteps": ["Simmer", "Blend"],
        "cookTime": 1800,
        "rating": 5,
        "sourceUrl": "https://example.com/soup"
    });

    let response = post(app_for(client.clone()), "/recipes", body).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let id = response.json()["id"].as_str().unwrap().to_string();
    let saved = client
        .recipes()
        .into_iter()
        .find(|r| r.identifier == id)
        .unwrap();
    assert_eq!(saved.name, "Tomato Soup");
    assert_eq!(saved.cook_time, Some(1800));
    assert_eq!(saved.preparation_steps, vec!["Simmer", "Blend"]);
    assert!(saved.creation_timestamp.is_some());
}

#[tokio::test]
async fn invalid_recipe_reports_every_violation() {
    let (client, _) = seeded_client();
    let body = json!({
        "name": "",
        "cookTime": 12.5,
        "rating": 6,
        "sourceUrl": "not a url"
    });

    let response = post(app_for(client.clone()), "/recipes", body).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let errors = response.errors();
    assert!(errors.contains(&"Recipe name is required and must be a non-empty string".to_string()));
    assert!(errors.contains(&"Cook time must be a non-negative integer".to_string()));
    assert!(errors.contains(&"Rating must be an integer between 1 and 5".to_string()));
    assert!(errors.contains(&"Source URL must be a valid URL format".to_string()));
    assert_eq!(client.recipes().len(), 3);
}

#[tokio::test]
async fn non_object_body_is_a_bad_request() {
    let (client, _) = seeded_client();
    let response = post(app_for(client), "/recipes", json!(["Soup"])).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updates_only_given_fields() {
    let (client, _) = seeded_client();
    let response = put(
        app_for(client.clone()),
        "/recipes/r3",
        json!({ "rating": 4, "note": "Use buttermilk" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "id": "r3" }));

    let saved = client
        .recipes()
        .into_iter()
        .find(|r| r.identifier == "r3")
        .unwrap();
    assert_eq!(saved.name, "Pancakes");
    assert_eq!(saved.rating, Some(4));
    assert_eq!(saved.note.as_deref(), Some("Use buttermilk"));
}

#[tokio::test]
async fn update_validation_runs_before_lookup() {
    let (client, _) = seeded_client();
    let response = put(app_for(client), "/recipes/r1", json!({ "prepTime": -5 })).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.errors(),
        vec!["Prep time must be a non-negative integer"]
    );
}

#[tokio::test]
async fn deletes_recipe() {
    let (client, _) = seeded_client();
    let response = delete(app_for(client.clone()), "/recipes/r1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(client.recipes().iter().all(|r| r.identifier != "r1"));
}

#[tokio::test]
async fn lists_collections() {
    let (client, _) = seeded_client();
    let response = get(app_for(client), "/recipe-collections").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "collections": [
                { "id": "c1", "name": "Desserts", "recipeIds": ["r1"] },
                { "id": "c2", "name": "Main Dishes", "recipeIds": ["r2"] }
            ]
        })
    );
}
