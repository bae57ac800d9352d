/**
 * Todo Database Operations
 *
 * Every query is scoped by `(id, user_id)` or `user_id`; a todo owned by
 * someone else behaves exactly like a missing one. Mutations are single
 * statements with `RETURNING`, so callers never observe a half-applied
 * change.
 */

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::todos::types::{TodoRow, TODO_COLUMNS};
use crate::shared::todo::{CategoryCount, PriorityCount};
use crate::shared::{
    CreateTodoRequest, Pagination, Priority, SortField, SortOrder, Todo, TodoListQuery, TodoPage,
    TodoStats, TodoSummary, UpdateTodoRequest,
};

const PRIORITY_RANK: &str = "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END";

fn into_todo(row: TodoRow, now: DateTime<Utc>) -> Result<Todo, sqlx::Error> {
    row.into_todo(now).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn into_todos(rows: Vec<TodoRow>, now: DateTime<Utc>) -> Result<Vec<Todo>, sqlx::Error> {
    rows.into_iter().map(|row| into_todo(row, now)).collect()
}

/// Insert a todo owned by `user_id`
pub async fn create_todo(
    pool: &SqlitePool,
    user_id: Uuid,
    request: &CreateTodoRequest,
) -> Result<Todo, sqlx::Error> {
    let now = Utc::now();
    let query = format!(
        "INSERT INTO todos (id, user_id, title, title_folded, description, description_folded, completed, priority, due_date, category, tags, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?) RETURNING {TODO_COLUMNS}"
    );
    let tags = request.tags.clone().unwrap_or_default();

    let row = sqlx::query_as::<_, TodoRow>(&query)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&request.title)
        .bind(request.title.to_lowercase())
        .bind(&request.description)
        .bind(request.description.as_deref().map(str::to_lowercase))
        .bind(request.priority.unwrap_or_default().as_str())
        .bind(request.due_date)
        .bind(&request.category)
        .bind(Json(tags))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

    into_todo(row, now)
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, user_id: Uuid, query: &TodoListQuery) {
    builder.push(" WHERE user_id = ").push_bind(user_id);

    if let Some(completed) = query.completed {
        builder.push(" AND completed = ").push_bind(completed);
    }
    if let Some(priority) = query.priority {
        builder.push(" AND priority = ").push_bind(priority.as_str());
    }
    if let Some(category) = &query.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    // SQLite's lower() only folds ASCII, so both sides are folded in Rust
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        builder
            .push(" AND (instr(title_folded, ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(COALESCE(description_folded, ''), ")
            .push_bind(needle)
            .push(") > 0)");
    }
}

fn sort_expression(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
        SortField::Title => "title",
        SortField::DueDate => "due_date",
        SortField::Priority => PRIORITY_RANK,
    }
}

/// Filtered, sorted page of the caller's todos
pub async fn list_todos(
    pool: &SqlitePool,
    user_id: Uuid,
    query: &TodoListQuery,
) -> Result<TodoPage, sqlx::Error> {
    let now = Utc::now();
    let page = query.page();
    let limit = query.limit();

    let mut count: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM todos");
    push_filters(&mut count, user_id, query);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let direction = match query.sort_order.unwrap_or_default() {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    let mut select: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
    select.push(TODO_COLUMNS).push(" FROM todos");
    push_filters(&mut select, user_id, query);
    select
        .push(" ORDER BY ")
        .push(sort_expression(query.sort_by.unwrap_or_default()))
        .push(" ")
        .push(direction)
        .push(", rowid ")
        .push(direction)
        .push(" LIMIT ")
        .push_bind(i64::from(limit))
        .push(" OFFSET ")
        .push_bind(i64::from(page - 1) * i64::from(limit));

    let rows = select.build_query_as::<TodoRow>().fetch_all(pool).await?;

    Ok(TodoPage {
        todos: into_todos(rows, now)?,
        pagination: Pagination::new(page, limit, total),
    })
}

pub async fn get_todo(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
    let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ? AND user_id = ?");
    let row = sqlx::query_as::<_, TodoRow>(&query)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    row.map(|row| into_todo(row, Utc::now())).transpose()
}

/// Apply the given fields; `None` when the todo is missing or foreign
pub async fn update_todo(
    pool: &SqlitePool,
    id: Uuid,
    user_id: Uuid,
    changes: &UpdateTodoRequest,
) -> Result<Option<Todo>, sqlx::Error> {
    let now = Utc::now();
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE todos SET updated_at = ");
    builder.push_bind(now);

    if let Some(title) = &changes.title {
        builder.push(", title = ").push_bind(title.clone());
        builder.push(", title_folded = ").push_bind(title.to_lowercase());
    }
    if let Some(description) = &changes.description {
        builder.push(", description = ").push_bind(description.clone());
        builder
            .push(", description_folded = ")
            .push_bind(description.as_deref().map(str::to_lowercase));
    }
    if let Some(priority) = changes.priority {
        builder.push(", priority = ").push_bind(priority.as_str());
    }
    if let Some(due_date) = changes.due_date {
        builder.push(", due_date = ").push_bind(due_date);
    }
    if let Some(category) = &changes.category {
        builder.push(", category = ").push_bind(category.clone());
    }
    if let Some(tags) = &changes.tags {
        builder.push(", tags = ").push_bind(Json(tags.clone()));
    }
    if let Some(completed) = changes.completed {
        builder.push(", completed = ").push_bind(completed);
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND user_id = ")
        .push_bind(user_id)
        .push(" RETURNING ")
        .push(TODO_COLUMNS);

    let row = builder.build_query_as::<TodoRow>().fetch_optional(pool).await?;
    row.map(|row| into_todo(row, now)).transpose()
}

/// Flip `completed` in one statement
pub async fn toggle_todo(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
    let now = Utc::now();
    let query = format!(
        "UPDATE todos SET completed = NOT completed, updated_at = ? WHERE id = ? AND user_id = ? RETURNING {TODO_COLUMNS}"
    );
    let row = sqlx::query_as::<_, TodoRow>(&query)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    row.map(|row| into_todo(row, now)).transpose()
}

/// `true` when a row was removed
pub async fn delete_todo(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove every completed todo of the user, returning how many went
pub async fn delete_completed(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE user_id = ? AND completed = 1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Total, completed and overdue counts for one user
pub async fn summary(pool: &SqlitePool, user_id: Uuid) -> Result<TodoSummary, sqlx::Error> {
    let (total, completed, overdue): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COALESCE(SUM(completed), 0), \
                COALESCE(SUM(CASE WHEN completed = 0 AND due_date IS NOT NULL AND due_date < ? THEN 1 ELSE 0 END), 0) \
         FROM todos WHERE user_id = ?",
    )
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(TodoSummary::new(total, completed, overdue))
}

/// Summary plus breakdowns by priority and by category
pub async fn stats(pool: &SqlitePool, user_id: Uuid) -> Result<TodoStats, sqlx::Error> {
    let summary = summary(pool, user_id).await?;

    let priority_rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT priority, COUNT(*) FROM todos WHERE user_id = ? GROUP BY priority")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    let mut todos_by_priority = priority_rows
        .into_iter()
        .map(|(priority, count)| {
            priority
                .parse::<Priority>()
                .map(|priority| PriorityCount { priority, count })
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    todos_by_priority.sort_by_key(|entry| std::cmp::Reverse(entry.priority));

    let category_rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT category, COUNT(*) FROM todos WHERE user_id = ? AND category IS NOT NULL \
         GROUP BY category ORDER BY COUNT(*) DESC, category ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    let todos_by_category = category_rows
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    Ok(TodoStats {
        summary,
        todos_by_priority,
        todos_by_category,
    })
}

/// Open todos past their due date, earliest first
pub async fn overdue(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Todo>, sqlx::Error> {
    let now = Utc::now();
    let query = format!(
        "SELECT {TODO_COLUMNS} FROM todos \
         WHERE user_id = ? AND completed = 0 AND due_date IS NOT NULL AND due_date < ? \
         ORDER BY due_date ASC, rowid ASC"
    );
    let rows = sqlx::query_as::<_, TodoRow>(&query)
        .bind(user_id)
        .bind(now)
        .fetch_all(pool)
        .await?;
    into_todos(rows, now)
}

/// `(total, completed)` across every user
pub async fn count_all(pool: &SqlitePool) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>("SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM todos")
        .fetch_one(pool)
        .await
}
