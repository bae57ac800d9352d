//! Storage row for the `todos` table

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::shared::todo::is_overdue;
use crate::shared::{SharedError, Todo};

pub(crate) const TODO_COLUMNS: &str =
    "id, user_id, title, description, completed, priority, due_date, category, tags, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TodoRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoRow {
    /// Wire shape with `isOverdue` computed against `now`
    pub fn into_todo(self, now: DateTime<Utc>) -> Result<Todo, SharedError> {
        Ok(Todo {
            id: self.id,
            user_id: self.user_id,
            is_overdue: is_overdue(self.due_date, self.completed, now),
            title: self.title,
            description: self.description,
            completed: self.completed,
            priority: self.priority.parse()?,
            due_date: self.due_date,
            category: self.category,
            tags: self.tags.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
