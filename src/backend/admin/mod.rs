//! Admin Module
//!
//! Global statistics and account management for users with the `admin`
//! role. The first admin is created by setting `ADMIN_BOOTSTRAP_USERNAME`
//! to an existing account; see `server::init`.

pub mod handlers;

pub use handlers::{admin_stats, list_users, update_user};
