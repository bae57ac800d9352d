//! Admin dashboard wire types

use serde::{Deserialize, Serialize};

use crate::shared::todo::completion_rate;

/// Global counters across every account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users_count: i64,
    pub active_users: i64,
    pub todos_count: i64,
    pub completed_todos: i64,
    pub completion_rate: i64,
}

impl AdminStats {
    pub fn new(users_count: i64, active_users: i64, todos_count: i64, completed_todos: i64) -> Self {
        Self {
            users_count,
            active_users,
            todos_count,
            completed_todos,
            completion_rate: completion_rate(completed_todos, todos_count),
        }
    }
}
