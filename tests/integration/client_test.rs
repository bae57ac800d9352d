//! Typed client against a live listener

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use todo_auth::backend::routes::{create_router, HttpOptions};
use todo_auth::client::{ApiClient, ClientConfig, ClientError, TokenStore};
use todo_auth::shared::config::AppConfig;
use todo_auth::shared::{
    CreateTodoRequest, Priority, RegisterRequest, SortField, SortOrder, TodoListQuery,
    UpdateProfileRequest, UpdateTodoRequest,
};

use crate::common::{test_state, TEST_PASSWORD};

/// Serve the app on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let state = test_state().await;
    let app = create_router(state, &HttpOptions::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str, tokens: TokenStore) -> ApiClient {
    let config = ClientConfig::with_builder(AppConfig::builder().server_url(base_url))
        .expect("valid base url");
    ApiClient::new(config, tokens)
}

fn alice() -> RegisterRequest {
    RegisterRequest {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: TEST_PASSWORD.to_string(),
        first_name: Some("Alice".to_string()),
        last_name: None,
    }
}

#[tokio::test]
async fn test_client_todo_flow() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, TokenStore::in_memory());

    let health = client.health().await.unwrap();
    assert_eq!(health["success"], true);

    let auth = client.register(&alice()).await.unwrap();
    assert_eq!(auth.user.username, "alice");
    assert!(client.is_authenticated().await);

    let milk = client
        .create_todo(&CreateTodoRequest {
            title: "buy milk".to_string(),
            priority: Some(Priority::High),
            tags: Some(vec!["shopping".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    client
        .create_todo(&CreateTodoRequest {
            title: "walk dog".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let toggled = client.toggle_todo(milk.id).await.unwrap();
    assert!(toggled.completed);

    let page = client
        .list_todos(&TodoListQuery {
            sort_by: Some(SortField::Title),
            sort_order: Some(SortOrder::Asc),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.todos.len(), 1);
    assert_eq!(page.todos[0].title, "buy milk");
    assert_eq!(page.pagination.total_pages, 2);

    let updated = client
        .update_todo(
            milk.id,
            &UpdateTodoRequest {
                description: Some(Some("two litres".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("two litres"));
    assert_eq!(client.get_todo(milk.id).await.unwrap(), updated);

    let stats = client.todo_stats().await.unwrap();
    assert_eq!(stats.summary.total_todos, 2);
    assert_eq!(stats.summary.completion_rate, 50);
    assert!(client.overdue_todos().await.unwrap().is_empty());

    assert_eq!(client.delete_completed().await.unwrap(), 1);
    let profile = client.profile().await.unwrap();
    assert_eq!(profile.stats.total_todos, 1);
    assert_eq!(profile.user.full_name, "alice");

    let user = client
        .update_profile(&UpdateProfileRequest {
            last_name: Some(Some("Martin".to_string())),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.full_name, "Alice Martin");

    client.logout().await.unwrap();
    assert!(!client.is_authenticated().await);
    assert!(matches!(client.verify().await, Err(ClientError::NotAuthenticated)));
}

#[tokio::test]
async fn test_client_surfaces_server_messages() {
    let base_url = spawn_server().await;
    let client = client_for(&base_url, TokenStore::in_memory());

    let err = client.login("nobody", TEST_PASSWORD).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid username or password");
    assert_eq!(err.status(), Some(401));

    client.register(&alice()).await.unwrap();
    let err = client
        .create_todo(&CreateTodoRequest {
            title: String::new(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid data");
    assert_eq!(err.field_errors()[0].field, "title");

    let err = client.admin_stats().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn test_client_clears_rejected_token() {
    let base_url = spawn_server().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");

    let mut tokens = TokenStore::file(&path).unwrap();
    tokens.set("stale-token").unwrap();
    let client = client_for(&base_url, tokens);

    let err = client.verify().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!client.is_authenticated().await);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_token_file_survives_new_client() {
    let base_url = spawn_server().await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");

    let client = client_for(&base_url, TokenStore::file(&path).unwrap());
    client.register(&alice()).await.unwrap();

    let restarted = client_for(&base_url, TokenStore::file(&path).unwrap());
    let user = restarted.verify().await.unwrap();
    assert_eq!(user.username, "alice");
}
