//! Integration tests for the HTTP API.
//!
//! Each test spins up the full router over a real remote and drives it
//! through `tower::ServiceExt::oneshot`, asserting on status codes and
//! JSON bodies exactly as a frontend would see them.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_test_app, get_json, login, post_json, request};

const EMPTY_MENU: &str = "{\n  \"categories\": []\n}\n";

// =============================================================================
// Public Routes
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let (app, _remote, _clone) = build_test_app();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn login_returns_a_bearer_token() {
    let (app, _remote, _clone) = build_test_app();

    let (status, json) = post_json(
        app,
        "/api/auth/login",
        &json!({ "username": "admin", "password": "hunter2" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "Bearer");
    assert_eq!(json["username"], "admin");
    assert_eq!(json["email"], "admin@example.com");

    let token = json["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _remote, _clone) = build_test_app();

    let (status, json) = post_json(
        app,
        "/api/auth/login",
        &json!({ "username": "admin", "password": "wrong" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_credentials");
}

#[tokio::test]
async fn validate_reports_on_the_presented_token() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) =
        request(app.clone(), "GET", "/api/auth/validate", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);
    assert_eq!(json["username"], "admin");

    let (status, json) = get_json(app, "/api/auth/validate").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_token");
}

// =============================================================================
// Authentication Guard
// =============================================================================

#[tokio::test]
async fn menu_requires_authentication() {
    let (app, _remote, _clone) = build_test_app();

    let (status, json) = get_json(app.clone(), "/api/menu").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_token");

    let token = login(app.clone()).await;
    let (status, json) = request(app, "GET", "/api/menu", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categories"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, _remote, _clone) = build_test_app();

    let (status, json) = request(app, "GET", "/api/menu", Some("deadbeef"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_token");
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn category_crud_round_trip() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app.clone(),
        "POST",
        "/api/categories",
        Some(&token),
        Some(&json!({ "id": "desserts", "name": "Desserts", "display_order": 3, "dishes": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], "desserts");
    assert_eq!(remote.head_message(), "Add new category: Desserts");

    let (status, json) = request(app.clone(), "GET", "/api/categories", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);

    // Clients send the whole entity back on update; extra fields are ignored.
    let (status, json) = request(
        app.clone(),
        "PUT",
        "/api/categories/desserts",
        Some(&token),
        Some(&json!({ "id": "desserts", "name": "Sweet Endings", "display_order": 4, "dishes": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Sweet Endings");
    assert_eq!(json["display_order"], 4);
    assert_eq!(remote.head_message(), "Update category: Sweet Endings");

    let (status, json) = request(
        app.clone(),
        "DELETE",
        "/api/categories/desserts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, serde_json::Value::Null);

    let (status, json) = request(
        app,
        "GET",
        "/api/categories/desserts",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "category_not_found");
}

#[tokio::test]
async fn duplicate_category_is_a_conflict() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app,
        "POST",
        "/api/categories",
        Some(&token),
        Some(&json!({ "id": "starters", "name": "Starters Again", "display_order": 7 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate_category");
}

#[tokio::test]
async fn invalid_category_body_is_a_validation_error() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app,
        "POST",
        "/api/categories",
        Some(&token),
        Some(&json!({ "id": "bad", "name": "Bad Order", "display_order": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn overlong_path_id_is_a_bad_request() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let uri = format!("/api/categories/{}", "a".repeat(101));
    let (status, json) = request(app, "GET", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

// =============================================================================
// Dishes
// =============================================================================

#[tokio::test]
async fn dish_lifecycle_over_http() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    // The supplied category_id is overridden by the path.
    let (status, json) = request(
        app.clone(),
        "POST",
        "/api/categories/starters/dishes",
        Some(&token),
        Some(&json!({
            "id": "pakora",
            "name": "Onion Pakora",
            "price": 95,
            "image": "pakora.jpg",
            "category_id": "somewhere-else"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["category_id"], "starters");
    assert_eq!(
        remote.head_message(),
        "Add new dish: Onion Pakora to category: Starters"
    );

    let (status, json) = request(app.clone(), "GET", "/api/dishes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);

    let (status, json) = request(
        app.clone(),
        "GET",
        "/api/categories/starters/dishes",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    // Round-trip an update: fetch the dish, tweak it, send the whole thing back.
    let (status, mut dish) = request(
        app.clone(),
        "GET",
        "/api/categories/starters/dishes/pakora",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    dish["name"] = json!("Paneer Pakora");
    dish["is_spicy"] = json!(true);

    let (status, json) = request(
        app.clone(),
        "PUT",
        "/api/categories/starters/dishes/pakora",
        Some(&token),
        Some(&dish),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Paneer Pakora");
    assert_eq!(json["is_spicy"], true);
    assert_eq!(remote.head_message(), "Update dish: Paneer Pakora");

    let (status, json) = request(
        app.clone(),
        "DELETE",
        "/api/categories/starters/dishes/pakora",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, serde_json::Value::Null);

    let (status, json) = request(
        app,
        "GET",
        "/api/categories/starters/dishes/pakora",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "dish_not_found");
}

#[tokio::test]
async fn availability_toggle_flips_the_flag() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app.clone(),
        "PATCH",
        "/api/categories/mains/dishes/biryani/availability",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available"], false);
    assert_eq!(
        remote.head_message(),
        "Mark dish unavailable: Hyderabadi Biryani"
    );

    let (status, json) = request(
        app,
        "PATCH",
        "/api/categories/mains/dishes/biryani/availability",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available"], true);
}

#[tokio::test]
async fn price_update_via_dedicated_endpoint() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app,
        "PATCH",
        "/api/categories/mains/dishes/biryani/price",
        Some(&token),
        Some(&json!({ "price": 300 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 300);
    assert_eq!(
        remote.head_message(),
        "Update Hyderabadi Biryani price: 250 → 300"
    );
}

#[tokio::test]
async fn negative_price_is_a_bad_request() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(
        app,
        "PATCH",
        "/api/categories/mains/dishes/biryani/price",
        Some(&token),
        Some(&json!({ "price": -50 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
    assert_eq!(remote.commit_count(), 1);
}

// =============================================================================
// Repository Sync
// =============================================================================

#[tokio::test]
async fn sync_reports_and_repairs_divergence() {
    let (app, remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(app.clone(), "POST", "/api/sync", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "in_sync");

    remote.commit_file("menu.json", EMPTY_MENU, "External edit");

    let (status, json) = request(app.clone(), "POST", "/api/sync", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "fast_forwarded");

    let (status, json) = request(app, "GET", "/api/menu", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sync_status_reports_branch_and_divergence() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, json) = request(app, "GET", "/api/sync/status", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["branch"], "main");
    assert_eq!(json["ahead_of_remote"], 0);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _remote, _clone) = build_test_app();
    let token = login(app.clone()).await;

    let (status, _) = request(app, "GET", "/api/nothing-here", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
