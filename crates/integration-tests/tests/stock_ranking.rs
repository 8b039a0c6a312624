//! Stores, items and the stock-ratio ranking.

use axum::http::StatusCode;

use pantry_integration_tests::{TestApp, id_after, position};

#[tokio::test]
async fn test_items_rank_by_ascending_stock_ratio() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    app.create_item(store_id, "Eggs", 8, 12, 10).await;
    app.create_item(store_id, "Milk", 2, 12, 10).await;

    let page = app.get(&format!("/stores/{store_id}/items")).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(position(&page.body, "milk") < position(&page.body, "eggs"));
}

#[tokio::test]
async fn test_zero_minimum_items_rank_last() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    app.create_item(store_id, "Salt", 0, 1, 0).await;
    app.create_item(store_id, "Flour", 50, 60, 1).await;
    app.create_item(store_id, "Barley", 1, 8, 4).await;

    let page = app.get(&format!("/stores/{store_id}/items")).await;
    let barley = position(&page.body, "barley");
    let flour = position(&page.body, "flour");
    let salt = position(&page.body, "salt");
    assert!(barley < flour);
    assert!(flour < salt);
}

#[tokio::test]
async fn test_minimum_above_ideal_is_rejected_before_saving() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    let response = app.create_item(store_id, "Butter", 5, 3, 4).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Minimum stock cannot exceed ideal stock."));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM item")
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_item_creation_redirects_to_ranking() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    let response = app.create_item(store_id, "Coffee", 1, 4, 2).await;
    assert_eq!(
        response.redirect_target(),
        format!("/stores/{store_id}/items")
    );
}

#[tokio::test]
async fn test_stock_update_reorders_ranking() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    app.create_item(store_id, "Eggs", 8, 12, 10).await;
    app.create_item(store_id, "Milk", 2, 12, 10).await;

    // Eggs is item 1.
    let response = app
        .post_form(
            &format!("/stores/{store_id}/items/1/stock"),
            &[("current_stock", "0")],
        )
        .await;
    assert_eq!(
        response.redirect_target(),
        format!("/stores/{store_id}/items")
    );

    let page = app.get(&format!("/stores/{store_id}/items")).await;
    assert!(position(&page.body, "eggs") < position(&page.body, "milk"));
}

#[tokio::test]
async fn test_negative_stock_update_is_rejected() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;
    app.create_item(store_id, "Eggs", 8, 12, 10).await;

    let response = app
        .post_form(
            &format!("/stores/{store_id}/items/1/stock"),
            &[("current_stock", "-3")],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let current: i64 = sqlx::query_scalar("SELECT current_stock FROM item WHERE id = 1")
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(current, 8);
}

#[tokio::test]
async fn test_store_of_other_household_is_not_found() {
    let mut app = TestApp::spawn().await;
    let store_id = app.signed_in_with_store("12 Elm Street").await;

    let mut other = app.new_client();
    other.signed_in_with_store("99 Oak Avenue").await;

    let response = other.get(&format!("/stores/{store_id}/items")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = other.create_item(store_id, "Eggs", 1, 2, 1).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_store_name_conflicts() {
    let mut app = TestApp::spawn().await;
    app.signed_in_with_store("12 Elm Street").await;

    let response = app
        .post_form("/stores/create", &[("name", "corner market")])
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_store_with_address_is_listed() {
    let mut app = TestApp::spawn().await;
    app.signed_in_with_store("12 Elm Street").await;

    let response = app
        .post_form(
            "/stores/create",
            &[
                ("name", "Farmers Market"),
                ("street_address", "1 Market Square"),
                ("city", "Springfield"),
                ("state", "IL"),
                ("zip_code", "62701"),
            ],
        )
        .await;
    let store_id = id_after(response.redirect_target(), "/stores/");
    assert!(store_id > 1);

    let page = app.get("/stores").await;
    assert!(page.body.contains("farmers market"));
    assert!(page.body.contains("corner market"));
}
