//! Per-route rule sets and the typed inputs they guard
//!
//! Each `*_input` function validates the raw JSON (or query map, or path
//! segment), then deserializes it into the shared request type and
//! normalizes it: strings trimmed, emails lowercased, empty optional text
//! turned into `None`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::validation::rules::{
    array, boolean, boolean_text, email, future_date, integer_in, is_string, iso_date, length,
    not_empty, object, one_of, username, uuid, Rule, RuleSet,
};
use crate::shared::todo::MAX_PAGE_SIZE;
use crate::shared::user::{Language, Theme};
use crate::shared::{
    AdminUserUpdate, CreateTodoRequest, FieldError, FieldLocation, LoginRequest, Priority,
    RegisterRequest, Role, SortField, SortOrder, TodoListQuery, UpdateProfileRequest,
    UpdateTodoRequest,
};

static REGISTER: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::required("username")
                .check(length(3, 30), "Username must be between 3 and 30 characters")
                .check(username, "Username may only contain letters, digits and underscores"),
            Rule::required("email").check(email, "Invalid email address"),
            Rule::required("password")
                .check(is_string, "Password must be at least 6 characters")
                .check(|v| v.as_str().is_some_and(|p| p.chars().count() >= 6), "Password must be at least 6 characters"),
            Rule::optional("firstName").check(length(0, 50), "First name cannot exceed 50 characters"),
            Rule::optional("lastName").check(length(0, 50), "Last name cannot exceed 50 characters"),
        ],
    )
});

static LOGIN: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::required("username").check(not_empty, "Username or email is required"),
            Rule::required("password").check(not_empty, "Password is required"),
        ],
    )
});

static UPDATE_PROFILE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::optional("firstName").check(length(0, 50), "First name cannot exceed 50 characters"),
            Rule::optional("lastName").check(length(0, 50), "Last name cannot exceed 50 characters"),
            Rule::optional("email").check(email, "Invalid email address"),
            Rule::optional("preferences").check(object, "Preferences must be an object"),
            Rule::optional("preferences.theme").check(one_of(&Theme::ALL), "Theme must be light or dark"),
            Rule::optional("preferences.language").check(one_of(&Language::ALL), "Language must be fr or en"),
            Rule::optional("preferences.notifications").check(object, "Notifications must be an object"),
            Rule::optional("preferences.notifications.email")
                .check(boolean, "Email notifications must be a boolean"),
            Rule::optional("preferences.notifications.push")
                .check(boolean, "Push notifications must be a boolean"),
        ],
    )
});

static CREATE_TODO: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::required("title").check(length(1, 100), "Title must be between 1 and 100 characters"),
            Rule::optional("description").check(length(0, 500), "Description cannot exceed 500 characters"),
            Rule::optional("priority").check(one_of(&Priority::ALL), "Priority must be low, medium or high"),
            Rule::optional("dueDate")
                .check(iso_date, "Due date must be a valid ISO 8601 date")
                .check(future_date, "Due date must be in the future"),
            Rule::optional("category").check(length(0, 50), "Category cannot exceed 50 characters"),
            Rule::optional("tags").check(array, "Tags must be an array"),
            Rule::optional("tags.*").check(length(0, 30), "Each tag cannot exceed 30 characters"),
        ],
    )
});

static UPDATE_TODO: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::optional("title").check(length(1, 100), "Title must be between 1 and 100 characters"),
            Rule::optional("description").check(length(0, 500), "Description cannot exceed 500 characters"),
            Rule::optional("priority").check(one_of(&Priority::ALL), "Priority must be low, medium or high"),
            Rule::optional("dueDate").check(iso_date, "Due date must be a valid ISO 8601 date"),
            Rule::optional("category").check(length(0, 50), "Category cannot exceed 50 characters"),
            Rule::optional("tags").check(array, "Tags must be an array"),
            Rule::optional("tags.*").check(length(0, 30), "Each tag cannot exceed 30 characters"),
            Rule::optional("completed").check(boolean, "Completed must be a boolean"),
        ],
    )
});

static LIST_QUERY: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Query,
        vec![
            Rule::optional("page").check(integer_in(1, i64::from(u32::MAX)), "Page must be a positive integer"),
            Rule::optional("limit").check(
                integer_in(1, i64::from(MAX_PAGE_SIZE)),
                "Limit must be between 1 and 100",
            ),
            Rule::optional("sortBy").check(one_of(&SortField::ALL), "Invalid sort field"),
            Rule::optional("sortOrder").check(one_of(&SortOrder::ALL), "Sort order must be asc or desc"),
            Rule::optional("completed").check(boolean_text, "Completed must be true or false"),
            Rule::optional("priority").check(one_of(&Priority::ALL), "Priority must be low, medium or high"),
            Rule::optional("category").check(length(0, 50), "Category cannot exceed 50 characters"),
            Rule::optional("search").check(length(0, 100), "Search cannot exceed 100 characters"),
        ],
    )
});

static ID_PARAM: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Params,
        vec![Rule::required("id").check(uuid, "Invalid identifier")],
    )
});

static ADMIN_UPDATE_USER: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        FieldLocation::Body,
        vec![
            Rule::optional("role").check(one_of(&Role::ALL), "Role must be user or admin"),
            Rule::optional("isActive").check(boolean, "isActive must be a boolean"),
        ],
    )
});

fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, BackendError> {
    serde_json::from_value(body).map_err(|err| {
        BackendError::validation(vec![FieldError::new("body", err.to_string(), FieldLocation::Body)])
    })
}

/// Trimmed text, `None` when nothing is left
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn clean_nullable(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(clean_optional)
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

pub fn register_input(body: Value) -> Result<RegisterRequest, BackendError> {
    REGISTER.check(&body)?;
    let request: RegisterRequest = from_body(body)?;
    Ok(RegisterRequest {
        username: request.username.trim().to_string(),
        email: request.email.trim().to_lowercase(),
        password: request.password,
        first_name: clean_optional(request.first_name),
        last_name: clean_optional(request.last_name),
    })
}

pub fn login_input(body: Value) -> Result<LoginRequest, BackendError> {
    LOGIN.check(&body)?;
    let request: LoginRequest = from_body(body)?;
    Ok(LoginRequest {
        username: request.username.trim().to_string(),
        password: request.password,
    })
}

pub fn update_profile_input(body: Value) -> Result<UpdateProfileRequest, BackendError> {
    UPDATE_PROFILE.check(&body)?;
    let request: UpdateProfileRequest = from_body(body)?;
    Ok(UpdateProfileRequest {
        first_name: clean_nullable(request.first_name),
        last_name: clean_nullable(request.last_name),
        email: request.email.map(|email| email.trim().to_lowercase()),
        preferences: request.preferences,
    })
}

pub fn create_todo_input(body: Value) -> Result<CreateTodoRequest, BackendError> {
    CREATE_TODO.check(&body)?;
    let request: CreateTodoRequest = from_body(body)?;
    Ok(CreateTodoRequest {
        title: request.title.trim().to_string(),
        description: clean_optional(request.description),
        priority: request.priority,
        due_date: request.due_date,
        category: clean_optional(request.category),
        tags: request.tags.map(clean_tags),
    })
}

pub fn update_todo_input(body: Value) -> Result<UpdateTodoRequest, BackendError> {
    UPDATE_TODO.check(&body)?;
    let request: UpdateTodoRequest = from_body(body)?;
    Ok(UpdateTodoRequest {
        title: request.title.map(|title| title.trim().to_string()),
        description: clean_nullable(request.description),
        priority: request.priority,
        due_date: request.due_date,
        category: clean_nullable(request.category),
        tags: request.tags.map(clean_tags),
        completed: request.completed,
    })
}

/// Query strings arrive as flat text pairs; empty values count as absent
pub fn list_query_input(params: HashMap<String, String>) -> Result<TodoListQuery, BackendError> {
    let map: Map<String, Value> = params
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    let input = Value::Object(map);
    LIST_QUERY.check(&input)?;

    let text = |key: &str| input.get(key).and_then(Value::as_str).map(str::trim);

    Ok(TodoListQuery {
        completed: text("completed").map(|value| value == "true"),
        priority: text("priority").map(str::parse).transpose()?,
        category: text("category").map(str::to_string),
        search: text("search").map(str::to_string),
        sort_by: text("sortBy").map(str::parse).transpose()?,
        sort_order: text("sortOrder").map(str::parse).transpose()?,
        page: text("page").and_then(|value| value.parse().ok()),
        limit: text("limit").and_then(|value| value.parse().ok()),
    })
}

pub fn id_param(raw: &str) -> Result<Uuid, BackendError> {
    let input = serde_json::json!({ "id": raw });
    ID_PARAM.check(&input)?;
    Uuid::parse_str(raw).map_err(|err| {
        BackendError::validation(vec![FieldError::new("id", err.to_string(), FieldLocation::Params)])
    })
}

pub fn admin_update_user_input(body: Value) -> Result<AdminUserUpdate, BackendError> {
    ADMIN_UPDATE_USER.check(&body)?;
    from_body(body)
}
