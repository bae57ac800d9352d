//! Authentication test helpers

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use todo_auth::backend::auth::users::promote_to_admin;
use todo_auth::backend::server::AppState;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret123";

/// A registered account and its token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Register `username` (email `<username>@example.com`) through the API
pub async fn register_user(server: &TestServer, username: &str) -> TestUser {
    let email = format!("{}@example.com", username);
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "register {}", username);

    let body: Value = response.json();
    TestUser {
        id: body["data"]["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("user id in register response"),
        username: username.to_string(),
        email,
        token: body["data"]["token"]
            .as_str()
            .expect("token in register response")
            .to_string(),
    }
}

/// Register `username` and grant it the admin role
pub async fn register_admin(server: &TestServer, state: &AppState, username: &str) -> TestUser {
    let user = register_user(server, username).await;
    assert!(promote_to_admin(&state.db_pool, username)
        .await
        .expect("promote to admin"));
    user
}

/// Create a todo for `user` and return the `data` object
pub async fn create_todo(server: &TestServer, user: &TestUser, body: Value) -> Value {
    let response = server
        .post("/api/todos")
        .authorization_bearer(&user.token)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "create todo {}", body);
    response.json::<Value>()["data"].clone()
}
