//! Authentication API integration tests
//!
//! Registration, login, profile, token verification and logout.

use axum::body::Bytes;
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    assert_failure, create_todo, error_fields, register_user, test_server, TEST_PASSWORD,
};

#[tokio::test]
async fn test_health() {
    let (server, _) = test_server().await;
    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_register_success() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "Alice@Example.com",
            "password": TEST_PASSWORD,
            "firstName": "Alice",
            "lastName": "Martin",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");

    let user = &body["data"]["user"];
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["fullName"], "Alice Martin");
    assert_eq!(user["role"], "user");
    assert_eq!(user["isActive"], true);
    assert_eq!(user["preferences"]["theme"], "light");
    assert_eq!(user["preferences"]["language"], "fr");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (server, _) = test_server().await;
    register_user(&server, "alice").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Username already taken");

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "bob",
            "email": "ALICE@example.com",
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Email already in use");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "a!",
            "email": "not-an-email",
            "password": "123",
        }))
        .await;

    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["username", "email", "password"]);
    assert_eq!(body["errors"][0]["location"], "body");
    assert_eq!(
        body["errors"][0]["message"],
        "Username must be between 3 and 30 characters"
    );
}

#[tokio::test]
async fn test_register_malformed_json() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .bytes(Bytes::from_static(b"{ not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let (server, _) = test_server().await;
    register_user(&server, "alice").await;

    for identifier in ["alice", "alice@example.com"] {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": identifier, "password": TEST_PASSWORD }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert!(body["data"]["user"]["lastLogin"].is_string());
    }
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let (server, _) = test_server().await;
    register_user(&server, "alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-password" }))
        .await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid username or password");

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid username or password");

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "", "password": "" }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["username", "password"]);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (server, _) = test_server().await;

    let response = server.get("/api/auth/profile").await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Access token required");

    let response = server.get("/api/auth/verify").authorization_bearer("garbage").await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid token");

    let response = server
        .get("/api/todos")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Access token required");
}

#[tokio::test]
async fn test_verify_and_logout() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let response = server.get("/api/auth/verify").authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Token valid");
    assert_eq!(body["data"]["user"]["id"], alice.id.to_string());

    let response = server.post("/api/auth/logout").authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn test_profile_includes_todo_stats() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let first = create_todo(&server, &alice, json!({ "title": "buy milk" })).await;
    create_todo(&server, &alice, json!({ "title": "walk dog" })).await;
    server
        .patch(&format!("/api/todos/{}/toggle", first["id"].as_str().unwrap()))
        .authorization_bearer(&alice.token)
        .await;

    let response = server.get("/api/auth/profile").authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(
        body["data"]["stats"],
        json!({
            "totalTodos": 2,
            "completedTodos": 1,
            "pendingTodos": 1,
            "overdueTodos": 0,
            "completionRate": 50,
        })
    );
}

#[tokio::test]
async fn test_update_profile() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&alice.token)
        .json(&json!({
            "firstName": "Alice",
            "lastName": "Martin",
            "preferences": { "theme": "dark", "notifications": { "push": false } },
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Profile updated");

    let user = &body["data"]["user"];
    assert_eq!(user["fullName"], "Alice Martin");
    assert_eq!(user["preferences"]["theme"], "dark");
    assert_eq!(user["preferences"]["language"], "fr");
    assert_eq!(user["preferences"]["notifications"]["email"], true);
    assert_eq!(user["preferences"]["notifications"]["push"], false);

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&alice.token)
        .json(&json!({ "lastName": null }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["fullName"], "alice");
    assert_eq!(body["data"]["user"]["firstName"], "Alice");
}

#[tokio::test]
async fn test_update_profile_rejections() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    register_user(&server, "bob").await;

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&alice.token)
        .json(&json!({ "email": "bob@example.com" }))
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Email already in use");

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&alice.token)
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .put("/api/auth/profile")
        .authorization_bearer(&alice.token)
        .json(&json!({ "preferences": { "theme": "blue", "language": "de" } }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(
        error_fields(&body),
        vec!["preferences.theme", "preferences.language"]
    );
}

#[tokio::test]
async fn test_unauthenticated_bad_body_is_unauthorized() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/todos")
        .json(&json!({ "title": "" }))
        .await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Access token required");
}
