mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn register_establishes_a_session() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/register",
            json!({ "username": "a@x.com", "password": "Secret1", "fullName": "Ada Doe" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let user = body_json(response).await;
    assert_eq!(user["username"], "a@x.com");
    assert_eq!(user["fullName"], "Ada Doe");
    assert_eq!(user["isAdmin"], false);
    assert!(user.get("password").is_none(), "password must never be exposed");

    let response = send(&app, request("GET", "/api/user", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "a@x.com");
    assert!(me.get("password").is_none());
}

#[tokio::test]
async fn register_validates_required_fields() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/register",
            json!({ "username": "a@x.com", "password": "", "fullName": "" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .expect("field errors")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"fullName"));
}

#[tokio::test]
async fn duplicate_username_conflicts_and_keeps_original_account() {
    let app = setup_app();

    let first = json!({ "username": "a@x.com", "password": "Secret1", "fullName": "Ada" });
    let response = send(&app, json_request("POST", "/api/register", first, None)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = json!({ "username": "a@x.com", "password": "Other99", "fullName": "Eve" });
    let response = send(&app, json_request("POST", "/api/register", second, None)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // the original credentials still log in; the pretender's never do
    login(&app, "a@x.com", "Secret1").await;
    let response = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({ "username": "a@x.com", "password": "Other99" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = setup_app();
    seed_admin(&app).await;

    let ghost = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({ "username": "ghost@x.com", "password": "anything" }),
            None,
        ),
    )
    .await;
    let wrong = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({ "username": ADMIN_USERNAME, "password": "not-the-password" }),
            None,
        ),
    )
    .await;

    assert_eq!(ghost.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_bytes(ghost).await,
        body_bytes(wrong).await,
        "unknown-user and wrong-password responses must match byte for byte"
    );
}

#[tokio::test]
async fn login_strips_password_from_response() {
    let app = setup_app();
    seed_admin(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/login",
            json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["isAdmin"], true);
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn logout_is_idempotent_and_ends_the_session() {
    let app = setup_app();
    let (cookie, _) = admin_session(&app).await;

    let response = send(&app, request("POST", "/api/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request("GET", "/api/user", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // logging out while anonymous is not an error
    let response = send(&app, request("POST", "/api/logout", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn anonymous_and_forged_cookies_are_rejected() {
    let app = setup_app();

    let response = send(&app, request("GET", "/api/user", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // an unsigned cookie fails signature verification
    let response = send(
        &app,
        request("GET", "/api/user", Some("club.sid=forged-session-id")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
