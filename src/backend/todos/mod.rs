//! Todo Module
//!
//! Owner-scoped task storage and the HTTP handlers on top of it.
//!
//! - **`types`** - `TodoRow` and its conversion into the wire `Todo`
//! - **`db`** - queries: CRUD, list with filters, toggle, bulk delete, stats
//! - **`handlers`** - `/api/todos` endpoints

pub mod db;

pub mod handlers;

pub(crate) mod types;

pub use handlers::{
    create_todo, delete_completed, delete_todo, get_todo, list_todos, overdue_todos, todo_stats,
    toggle_todo, update_todo,
};
