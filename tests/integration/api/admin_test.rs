//! Admin API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{
    assert_failure, create_todo, error_fields, register_admin, register_user, test_server,
    TEST_PASSWORD,
};

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let response = server.get("/api/admin/stats").authorization_bearer(&alice.token).await;
    assert_failure(&response, StatusCode::FORBIDDEN, "Admin access required");

    let response = server.get("/api/admin/users").await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Access token required");
}

#[tokio::test]
async fn test_admin_stats() {
    let (server, state) = test_server().await;
    let admin = register_admin(&server, &state, "root").await;
    let alice = register_user(&server, "alice").await;

    let first = create_todo(&server, &alice, json!({ "title": "one" })).await;
    create_todo(&server, &alice, json!({ "title": "two" })).await;
    create_todo(&server, &admin, json!({ "title": "three" })).await;
    server
        .patch(&format!("/api/todos/{}/toggle", first["id"].as_str().unwrap()))
        .authorization_bearer(&alice.token)
        .await;

    let response = server.get("/api/admin/stats").authorization_bearer(&admin.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["data"],
        json!({
            "usersCount": 2,
            "activeUsers": 2,
            "todosCount": 3,
            "completedTodos": 1,
            "completionRate": 33,
        })
    );
}

#[tokio::test]
async fn test_list_users_newest_first() {
    let (server, state) = test_server().await;
    let admin = register_admin(&server, &state, "root").await;
    register_user(&server, "alice").await;
    register_user(&server, "bob").await;

    let response = server.get("/api/admin/users").authorization_bearer(&admin.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let usernames: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["bob", "alice", "root"]);
    assert!(body["data"][0].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_update_user_role_and_status() {
    let (server, state) = test_server().await;
    let admin = register_admin(&server, &state, "root").await;
    let alice = register_user(&server, "alice").await;
    let path = format!("/api/admin/users/{}", alice.id);

    let response = server
        .patch(&path)
        .authorization_bearer(&admin.token)
        .json(&json!({ "role": "admin" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["isActive"], true);

    let response = server.get("/api/admin/stats").authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .patch(&path)
        .authorization_bearer(&admin.token)
        .json(&json!({ "isActive": false }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["isActive"], false);

    let response = server.get("/api/auth/verify").authorization_bearer(&alice.token).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "User not found or inactive");

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Account disabled");
}

#[tokio::test]
async fn test_update_user_rejections() {
    let (server, state) = test_server().await;
    let admin = register_admin(&server, &state, "root").await;

    let response = server
        .patch(&format!("/api/admin/users/{}", admin.id))
        .authorization_bearer(&admin.token)
        .json(&json!({ "role": "owner", "isActive": "no" }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["role", "isActive"]);

    let response = server
        .patch(&format!("/api/admin/users/{}", Uuid::new_v4()))
        .authorization_bearer(&admin.token)
        .json(&json!({ "isActive": false }))
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "User not found");
}
