//! `POST /api/auth/login` and the session it establishes.

use reqwest::StatusCode;
use serde_json::{Value, json};

use super::helpers::{TestPortal, auth_cookie, cookie_value};

#[tokio::test]
async fn test_login_sets_cookie_and_returns_session() {
    let portal = TestPortal::spawn().await;
    portal.api.add_user("ada@example.com", "s3cret!");

    let response = portal
        .post_json(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "s3cret!" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = auth_cookie(&response).expect("session cookie issued");
    assert!(!cookie_value(&cookie).is_empty());
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(cookie.contains("SameSite=Strict"), "{cookie}");
    assert!(cookie.contains("Max-Age=604800"), "{cookie}");

    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body,
        json!({ "redirect": "/home", "user": { "id": "user-123", "role": "member" } })
    );
}

#[tokio::test]
async fn test_issued_cookie_opens_home() {
    let portal = TestPortal::spawn().await;
    portal.api.add_user("ada@example.com", "s3cret!");

    let login = portal
        .post_json(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "s3cret!" }),
        )
        .await;
    let cookie = auth_cookie(&login).expect("session cookie issued");
    let token = cookie_value(&cookie).to_string();

    let home = portal.get_with_token("/home", &token).await;

    assert_eq!(home.status(), StatusCode::OK);
    let body: Value = home.json().await.expect("json body");
    assert_eq!(body["id"], "user-123");
}

#[tokio::test]
async fn test_wrong_password_is_a_form_error() {
    let portal = TestPortal::spawn().await;
    portal.api.add_user("ada@example.com", "s3cret!");

    let response = portal
        .post_json(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "guess" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(auth_cookie(&response), None);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body,
        json!({ "form": "Authentication failed. No token received." })
    );
}

#[tokio::test]
async fn test_invalid_fields_never_reach_the_api() {
    let portal = TestPortal::spawn().await;

    let response = portal
        .post_json("/api/auth/login", &json!({ "email": "ada", "password": "" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(auth_cookie(&response), None);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body,
        json!({
            "errors": {
                "email": "Please enter a valid email address",
                "password": "Password is required",
            }
        })
    );
}

#[tokio::test]
async fn test_undecodable_token_is_a_form_error() {
    let portal = TestPortal::spawn().await;
    portal.api.add_user("ada@example.com", "s3cret!");
    portal.api.issue_token("opaque-session-handle");

    let response = portal
        .post_json(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "s3cret!" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(auth_cookie(&response), None);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body,
        json!({ "form": "Failed to decode user data from token." })
    );
}
