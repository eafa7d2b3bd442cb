//! `POST /api/auth/register`: account creation followed by sign-in.

use reqwest::StatusCode;
use serde_json::{Value, json};

use super::helpers::{TestPortal, auth_cookie, cookie_value};

fn sign_up(email: &str, password: &str, confirmation: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": email,
        "password": password,
        "confirmPassword": confirmation,
    })
}

#[tokio::test]
async fn test_register_creates_active_user_and_signs_in() {
    let portal = TestPortal::spawn().await;

    let response = portal
        .post_json(
            "/api/auth/register",
            &sign_up("ada@example.com", "s3cret!", "s3cret!"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        portal.api.status_of("ada@example.com").as_deref(),
        Some("active")
    );
    let cookie = auth_cookie(&response).expect("session cookie issued");
    assert!(!cookie_value(&cookie).is_empty());

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["redirect"], "/home");
}

#[tokio::test]
async fn test_duplicate_email_surfaces_api_message() {
    let portal = TestPortal::spawn().await;
    portal.api.add_user("ada@example.com", "s3cret!");

    let response = portal
        .post_json(
            "/api/auth/register",
            &sign_up("ada@example.com", "n3w-pass", "n3w-pass"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(auth_cookie(&response), None);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({ "form": "Email already registered" }));
}

#[tokio::test]
async fn test_mismatched_confirmation_is_rejected_before_creation() {
    let portal = TestPortal::spawn().await;

    let response = portal
        .post_json(
            "/api/auth/register",
            &sign_up("ada@example.com", "s3cret!", "s3cret?"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(portal.api.status_of("ada@example.com"), None);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["errors"]["confirmPassword"], "Passwords do not match");
}

#[tokio::test]
async fn test_password_without_special_character_is_rejected() {
    let portal = TestPortal::spawn().await;

    let response = portal
        .post_json(
            "/api/auth/register",
            &sign_up("ada@example.com", "secret1", "secret1"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(
        body["errors"]["password"],
        "Password must contain at least one special character"
    );
}
