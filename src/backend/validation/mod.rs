//! Request Validation
//!
//! Declarative rule sets evaluated before a handler touches the store.
//! Any violation short-circuits with `BackendError::Validation`, rendered as
//! a 400 with message "Invalid data" and one `{ field, message, location }`
//! entry per failing field.
//!
//! - **`rules`** - `Rule`, `RuleSet` and the predicate library
//! - **`schemas`** - one rule set per route plus typed, normalized inputs

pub mod rules;

pub mod schemas;

pub use rules::{Rule, RuleSet};
pub use schemas::{
    admin_update_user_input, create_todo_input, id_param, list_query_input, login_input,
    register_input, update_profile_input, update_todo_input,
};
