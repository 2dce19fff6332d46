//! Authentication test helpers
//!
//! Registers accounts through the public API so every test exercises the
//! same token path as a real client.

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::TestApp;

pub const TEST_PASSWORD: &str = "secret1";

/// Registered account
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Register a user via `POST /api/users`
pub async fn register(app: &TestApp, name: &str, email: &str) -> TestUser {
    let response = app
        .server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "register failed: {}", response.text());

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().expect("user id").to_string(),
        name: name.to_string(),
        email: email.to_string(),
        token: body["token"].as_str().expect("token").to_string(),
    }
}

/// Log in via `POST /api/auth` and return the new token
pub async fn login(app: &TestApp, email: &str) -> String {
    let response = app
        .server
        .post("/api/auth")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed: {}", response.text());

    let body: Value = response.json();
    body["token"].as_str().expect("token").to_string()
}

/// Create a minimal profile for the user
pub async fn create_profile(app: &TestApp, user: &TestUser) -> Value {
    let response = app
        .server
        .post("/api/profile")
        .authorization_bearer(&user.token)
        .json(&json!({ "status": "Developer", "skills": "rust, sql" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

/// Create a post and return its id
pub async fn create_post(app: &TestApp, user: &TestUser, text: &str) -> String {
    let response = app
        .server
        .post("/api/posts")
        .authorization_bearer(&user.token)
        .json(&json!({ "text": text }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    body["id"].as_str().expect("post id").to_string()
}
