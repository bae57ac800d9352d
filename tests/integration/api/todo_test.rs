//! Todo API integration tests

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{assert_failure, create_todo, error_fields, register_user, test_server};

fn future_date(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

#[tokio::test]
async fn test_alice_buys_milk() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let todo = create_todo(&server, &alice, json!({ "title": "buy milk" })).await;
    assert_eq!(todo["title"], "buy milk");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["priority"], "medium");
    assert_eq!(todo["isOverdue"], false);
    assert_eq!(todo["tags"], json!([]));
    assert_eq!(todo["userId"], alice.id.to_string());
    let id = todo["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/api/todos/{}/toggle", id))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Todo marked as completed");
    assert_eq!(body["data"]["completed"], true);

    let response = server.get("/api/todos/stats").authorization_bearer(&alice.token).await;
    let body: Value = response.json();
    assert_eq!(body["data"]["totalTodos"], 1);
    assert_eq!(body["data"]["completedTodos"], 1);
    assert_eq!(body["data"]["completionRate"], 100);
}

#[tokio::test]
async fn test_create_todo_full_payload() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    let due = future_date(3);

    let todo = create_todo(
        &server,
        &alice,
        json!({
            "title": "  write report  ",
            "description": "quarterly numbers",
            "priority": "high",
            "dueDate": due,
            "category": "work",
            "tags": ["office", " ", "q3"],
        }),
    )
    .await;

    assert_eq!(todo["title"], "write report");
    assert_eq!(todo["priority"], "high");
    assert_eq!(todo["category"], "work");
    assert_eq!(todo["tags"], json!(["office", "q3"]));
    assert!(todo["dueDate"].is_string());
}

#[tokio::test]
async fn test_create_todo_validation() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let response = server
        .post("/api/todos")
        .authorization_bearer(&alice.token)
        .json(&json!({
            "title": "",
            "priority": "urgent",
            "dueDate": "2000-01-01",
            "tags": ["ok", "x".repeat(31)],
        }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["title", "priority", "dueDate", "tags[1]"]);
    assert_eq!(body["errors"][2]["message"], "Due date must be in the future");

    let response = server
        .post("/api/todos")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "x".repeat(101) }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(body["errors"][0]["message"], "Title must be between 1 and 100 characters");
}

#[tokio::test]
async fn test_todo_ownership_is_enforced() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    let bob = register_user(&server, "bob").await;

    let todo = create_todo(&server, &alice, json!({ "title": "private" })).await;
    let path = format!("/api/todos/{}", todo["id"].as_str().unwrap());

    let response = server.get(&path).authorization_bearer(&bob.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Todo not found");

    let response = server
        .patch(&format!("{}/toggle", path))
        .authorization_bearer(&bob.token)
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Todo not found");

    let response = server
        .put(&path)
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "hijacked" }))
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Todo not found");

    let response = server.delete(&path).authorization_bearer(&bob.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Todo not found");

    let response = server.get(&path).authorization_bearer(&alice.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "private");
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let response = server.get("/api/todos/not-a-uuid").authorization_bearer(&alice.token).await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["location"], "params");

    let response = server
        .get(&format!("/api/todos/{}", Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Todo not found");
}

#[tokio::test]
async fn test_update_todo() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    let todo = create_todo(
        &server,
        &alice,
        json!({ "title": "draft", "category": "work", "description": "notes" }),
    )
    .await;
    let path = format!("/api/todos/{}", todo["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({
            "title": "final",
            "priority": "low",
            "category": null,
            "completed": true,
            "tags": ["done"],
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Todo updated");
    let updated = &body["data"];
    assert_eq!(updated["title"], "final");
    assert_eq!(updated["priority"], "low");
    assert_eq!(updated["category"], Value::Null);
    assert_eq!(updated["description"], "notes");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["tags"], json!(["done"]));

    let response = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "completed": "yes" }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["completed"]);
}

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    let todo = create_todo(&server, &alice, json!({ "title": "flip" })).await;
    let path = format!("/api/todos/{}/toggle", todo["id"].as_str().unwrap());

    server.patch(&path).authorization_bearer(&alice.token).await;
    let response = server.patch(&path).authorization_bearer(&alice.token).await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Todo marked as not completed");
    assert_eq!(body["data"]["completed"], false);
}

#[tokio::test]
async fn test_pagination() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;
    for n in 0..25 {
        create_todo(&server, &alice, json!({ "title": format!("task {:02}", n) })).await;
    }

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("page", 2)
        .add_query_param("limit", 10)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["todos"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["data"]["pagination"],
        json!({ "currentPage": 2, "totalPages": 3, "totalItems": 25, "itemsPerPage": 10 })
    );

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("page", 3)
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["todos"].as_array().unwrap().len(), 5);

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("limit", 0)
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(body["errors"][0]["field"], "limit");
    assert_eq!(body["errors"][0]["location"], "query");
}

#[tokio::test]
async fn test_filters_search_and_sort() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    create_todo(&server, &alice, json!({ "title": "Buy milk", "priority": "low", "category": "home" })).await;
    let done = create_todo(&server, &alice, json!({ "title": "Pay rent", "priority": "high", "category": "home" })).await;
    create_todo(
        &server,
        &alice,
        json!({ "title": "Email boss", "description": "about the MILK budget", "category": "work" }),
    )
    .await;
    server
        .patch(&format!("/api/todos/{}/toggle", done["id"].as_str().unwrap()))
        .authorization_bearer(&alice.token)
        .await;

    let titles = |body: Value| -> Vec<String> {
        body["data"]["todos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|todo| todo["title"].as_str().unwrap().to_string())
            .collect()
    };

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("search", "milk")
        .add_query_param("sortBy", "title")
        .add_query_param("sortOrder", "asc")
        .await;
    assert_eq!(titles(response.json()), vec!["Buy milk", "Email boss"]);

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("completed", "true")
        .await;
    assert_eq!(titles(response.json()), vec!["Pay rent"]);

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("category", "home")
        .add_query_param("sortBy", "priority")
        .add_query_param("sortOrder", "desc")
        .await;
    assert_eq!(titles(response.json()), vec!["Pay rent", "Buy milk"]);

    let response = server
        .get("/api/todos")
        .authorization_bearer(&alice.token)
        .add_query_param("sortBy", "color")
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid data");
    assert_eq!(error_fields(&body), vec!["sortBy"]);
}

#[tokio::test]
async fn test_delete_todo_and_completed() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d"] {
        let todo = create_todo(&server, &alice, json!({ "title": title })).await;
        ids.push(todo["id"].as_str().unwrap().to_string());
    }
    for id in &ids[..2] {
        server
            .patch(&format!("/api/todos/{}/toggle", id))
            .authorization_bearer(&alice.token)
            .await;
    }

    let response = server
        .delete("/api/todos/completed/all")
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "2 completed todo(s) deleted");
    assert_eq!(body["data"]["deletedCount"], 2);

    let response = server
        .delete(&format!("/api/todos/{}", ids[2]))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Todo deleted");

    let response = server.get("/api/todos").authorization_bearer(&alice.token).await;
    let body: Value = response.json();
    assert_eq!(body["data"]["pagination"]["totalItems"], 1);
    assert_eq!(body["data"]["todos"][0]["id"], ids[3]);
}

#[tokio::test]
async fn test_stats_and_overdue() {
    let (server, _) = test_server().await;
    let alice = register_user(&server, "alice").await;

    let late = create_todo(
        &server,
        &alice,
        json!({ "title": "late", "priority": "high", "category": "work", "dueDate": future_date(1) }),
    )
    .await;
    create_todo(&server, &alice, json!({ "title": "someday", "category": "work" })).await;
    create_todo(&server, &alice, json!({ "title": "chores", "priority": "low", "category": "home" })).await;

    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let response = server
        .put(&format!("/api/todos/{}", late["id"].as_str().unwrap()))
        .authorization_bearer(&alice.token)
        .json(&json!({ "dueDate": past }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["isOverdue"], true);

    let response = server.get("/api/todos/overdue").authorization_bearer(&alice.token).await;
    let body: Value = response.json();
    let overdue = body["data"].as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["title"], "late");

    let response = server.get("/api/todos/stats").authorization_bearer(&alice.token).await;
    let body: Value = response.json();
    let stats = &body["data"];
    assert_eq!(stats["totalTodos"], 3);
    assert_eq!(stats["pendingTodos"], 3);
    assert_eq!(stats["overdueTodos"], 1);
    assert_eq!(stats["completionRate"], 0);
    assert_eq!(
        stats["todosByPriority"],
        json!([
            { "priority": "high", "count": 1 },
            { "priority": "medium", "count": 1 },
            { "priority": "low", "count": 1 },
        ])
    );
    assert_eq!(stats["todosByCategory"][0], json!({ "category": "work", "count": 2 }));
}
