//! Member-stage login and signup, scoped to the signed-in household.

use axum::http::StatusCode;

use pantry_integration_tests::TestApp;

#[tokio::test]
async fn test_member_pages_require_household() {
    let mut app = TestApp::spawn().await;

    let response = app.get("/member/select").await;
    assert_eq!(response.redirect_target(), "/household/select");

    let response = app.get("/stores").await;
    assert_eq!(response.redirect_target(), "/household/select");
}

#[tokio::test]
async fn test_store_pages_require_member() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;

    let response = app.get("/stores").await;
    assert_eq!(response.redirect_target(), "/member/select");
}

#[tokio::test]
async fn test_empty_household_is_sent_to_member_signup() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;

    let response = app.get("/member/select").await;
    assert_eq!(response.redirect_target(), "/member/create");
}

#[tokio::test]
async fn test_member_signup_and_login() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;

    let response = app.create_member("Alex", "correct horse").await;
    assert_eq!(response.redirect_target(), "/stores");

    let response = app.post_form("/member/logout", &[]).await;
    assert_eq!(
        response.redirect_target(),
        "/member/select?notice=signed_out"
    );

    let page = app.get("/member/select").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("alex"));

    let response = app.select_member(1, "wrong password").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid password."));

    let response = app.select_member(1, "correct horse").await;
    assert_eq!(response.redirect_target(), "/stores");
}

#[tokio::test]
async fn test_duplicate_member_name_in_household_conflicts() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;
    app.create_member("Alex", "correct horse").await;

    let response = app.create_member("alex", "battery staple").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body.contains("A member with this name already exists."));
}

#[tokio::test]
async fn test_same_member_name_in_other_household_is_allowed() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;
    app.create_member("Alex", "correct horse").await;

    let mut other = app.new_client();
    other.create_household("99 Oak Avenue", "open-sesame").await;
    let response = other.create_member("Alex", "correct horse").await;
    assert_eq!(response.redirect_target(), "/stores");
}

#[tokio::test]
async fn test_selecting_member_of_other_household_is_not_found() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;
    app.create_member("Alex", "correct horse").await;

    let mut other = app.new_client();
    other.create_household("99 Oak Avenue", "open-sesame").await;
    other.create_member("Sam", "battery staple").await;

    // Alex is member 1, in the first household.
    let response = other.select_member(1, "correct horse").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;

    let response = app.create_member("Alex", "short").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stale_member_session_redirects_once_then_keeps_household() {
    let mut app = TestApp::spawn().await;
    app.create_household("12 Elm Street", "open-sesame").await;
    app.create_member("Alex", "correct horse").await;

    sqlx::query("DELETE FROM member")
        .execute(app.pool())
        .await
        .unwrap();

    let response = app.get("/stores").await;
    assert_eq!(
        response.redirect_target(),
        "/member/select?notice=session_expired"
    );

    let response = app.get("/stores").await;
    assert_eq!(response.redirect_target(), "/member/select");

    // The household is still selected, and it has no members left.
    let response = app.get("/member/select").await;
    assert_eq!(response.redirect_target(), "/member/create");
}
