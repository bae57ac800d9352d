//! Shared Module
//!
//! Types shared between the backend and the API client. Everything here is
//! plain data plus a few pure computations (`full_name`, `is_overdue`,
//! `completion_rate`) so both sides derive fields the same way.

/// Admin dashboard types
pub mod admin;

/// Client-side application configuration
pub mod config;

/// `{ success, message, data, errors }` response envelope
pub mod envelope;

/// Shared error types
pub mod error;

pub(crate) mod nullable;

/// Todo entities, queries and statistics
pub mod todo;

/// User entities and auth payloads
pub mod user;

pub use admin::AdminStats;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use envelope::{ApiResponse, FieldError, FieldLocation};
pub use error::SharedError;
pub use todo::{
    CreateTodoRequest, DeletedCount, Pagination, Priority, SortField, SortOrder, Todo, TodoListQuery,
    TodoPage, TodoStats, TodoSummary, UpdateTodoRequest,
};
pub use user::{
    AdminUserUpdate, AuthPayload, LoginRequest, Preferences, ProfilePayload, RegisterRequest, Role,
    UpdateProfileRequest, UserPayload, UserProfile,
};
