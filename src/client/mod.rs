//! Todo API Client
//!
//! - **`api`** - `ApiClient`, one async method per endpoint
//! - **`token_store`** - bearer token kept in memory or in a file
//! - **`config`** - `CLIENT_API_URL` handling
//! - **`error`** - `ClientError`
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_auth::client::{ApiClient, ClientConfig, TokenStore};
//! use todo_auth::shared::CreateTodoRequest;
//!
//! # async fn example() -> Result<(), todo_auth::client::ClientError> {
//! let client = ApiClient::new(ClientConfig::from_env()?, TokenStore::default_location()?);
//! client.login("alice", "secret123").await?;
//! let todo = client
//!     .create_todo(&CreateTodoRequest {
//!         title: "buy milk".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! client.toggle_todo(todo.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod token_store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use token_store::TokenStore;
