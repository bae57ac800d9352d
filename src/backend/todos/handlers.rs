/**
 * Todo Handlers
 *
 * All routes here sit behind `require_auth`, so `AuthUser` is always
 * present. Bodies, query strings and path ids go through the validation
 * schemas before the store is touched.
 *
 * # Routes
 *
 * - `POST /api/todos` - create
 * - `GET /api/todos` - list with filters, sort and pagination
 * - `GET /api/todos/stats` - per-user statistics
 * - `GET /api/todos/overdue` - open todos past their due date
 * - `DELETE /api/todos/completed/all` - bulk delete completed
 * - `GET|PUT|DELETE /api/todos/{id}` - read, update, delete
 * - `PATCH /api/todos/{id}/toggle` - flip completion
 */

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::todos::db;
use crate::backend::validation::{create_todo_input, id_param, list_query_input, update_todo_input};
use crate::shared::{ApiResponse, DeletedCount, Todo, TodoPage, TodoStats};

pub const TODO_NOT_FOUND: &str = "Todo not found";

fn todo_not_found() -> BackendError {
    BackendError::not_found(TODO_NOT_FOUND)
}

pub async fn create_todo(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Todo>>), BackendError> {
    let Json(body) = payload?;
    let request = create_todo_input(body)?;

    let todo = db::create_todo(&pool, user.id, &request).await?;
    tracing::info!("Todo {} created by {}", todo.id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(todo).with_message("Todo created")),
    ))
}

pub async fn list_todos(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<ApiResponse<TodoPage>>, BackendError> {
    let Query(params) = params?;
    let query = list_query_input(params)?;

    let page = db::list_todos(&pool, user.id, &query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn get_todo(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Todo>>, BackendError> {
    let Path(id) = id?;
    let id = id_param(&id)?;

    let todo = db::get_todo(&pool, id, user.id).await?.ok_or_else(todo_not_found)?;
    Ok(Json(ApiResponse::ok(todo)))
}

pub async fn update_todo(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Todo>>, BackendError> {
    let Path(id) = id?;
    let id = id_param(&id)?;
    let Json(body) = payload?;
    let changes = update_todo_input(body)?;

    let todo = db::update_todo(&pool, id, user.id, &changes)
        .await?
        .ok_or_else(todo_not_found)?;
    tracing::info!("Todo {} updated by {}", todo.id, user.username);

    Ok(Json(ApiResponse::ok(todo).with_message("Todo updated")))
}

pub async fn toggle_todo(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Todo>>, BackendError> {
    let Path(id) = id?;
    let id = id_param(&id)?;

    let todo = db::toggle_todo(&pool, id, user.id).await?.ok_or_else(todo_not_found)?;
    let message = if todo.completed {
        "Todo marked as completed"
    } else {
        "Todo marked as not completed"
    };

    Ok(Json(ApiResponse::ok(todo).with_message(message)))
}

pub async fn delete_todo(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let Path(id) = id?;
    let id = id_param(&id)?;

    if !db::delete_todo(&pool, id, user.id).await? {
        return Err(todo_not_found());
    }
    tracing::info!("Todo {} deleted by {}", id, user.username);

    Ok(Json(ApiResponse::message("Todo deleted")))
}

pub async fn delete_completed(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<DeletedCount>>, BackendError> {
    let deleted_count = db::delete_completed(&pool, user.id).await?;
    tracing::info!("{} completed todos deleted by {}", deleted_count, user.username);

    Ok(Json(
        ApiResponse::ok(DeletedCount { deleted_count })
            .with_message(format!("{} completed todo(s) deleted", deleted_count)),
    ))
}

pub async fn todo_stats(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<TodoStats>>, BackendError> {
    let stats = db::stats(&pool, user.id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn overdue_todos(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Todo>>>, BackendError> {
    let todos = db::overdue(&pool, user.id).await?;
    Ok(Json(ApiResponse::ok(todos)))
}
