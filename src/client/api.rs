//! Todo API Client
//!
//! Async wrapper over every endpoint. Tokens returned by `register` and
//! `login` are kept in the [`TokenStore`] and attached as a bearer header to
//! later requests. A 401 from the server clears the stored token.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::token_store::TokenStore;
use crate::shared::{
    AdminStats, AdminUserUpdate, ApiResponse, AuthPayload, CreateTodoRequest, DeletedCount,
    LoginRequest, ProfilePayload, RegisterRequest, Todo, TodoListQuery, TodoPage, TodoStats,
    UpdateProfileRequest, UpdateTodoRequest, UserPayload, UserProfile,
};

pub struct ApiClient {
    config: ClientConfig,
    client: Client,
    tokens: Mutex<TokenStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: TokenStore) -> Self {
        Self {
            config,
            client: Client::new(),
            tokens: Mutex::new(tokens),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn token(&self) -> Option<String> {
        self.tokens.lock().await.get().map(str::to_string)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.lock().await.get().is_some()
    }

    /// `GET /api/health`, returned as raw JSON
    pub async fn health(&self) -> Result<Value, ClientError> {
        let response = self
            .client
            .get(self.config.api_url("/api/health"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        let payload: AuthPayload = self
            .data(self.request(Method::POST, "/api/auth/register").json(request))
            .await?;
        self.tokens.lock().await.set(payload.token.clone())?;
        Ok(payload)
    }

    /// `username` may also be the account email
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let payload: AuthPayload = self
            .data(self.request(Method::POST, "/api/auth/login").json(&request))
            .await?;
        self.tokens.lock().await.set(payload.token.clone())?;
        Ok(payload)
    }

    /// Tell the server, then forget the token whatever it answered
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .send::<Value>(self.authed(Method::POST, "/api/auth/logout").await?)
            .await;
        self.tokens.lock().await.clear()?;
        result.map(|_| ())
    }

    pub async fn profile(&self) -> Result<ProfilePayload, ClientError> {
        self.data(self.authed(Method::GET, "/api/auth/profile").await?).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile, ClientError> {
        let payload: UserPayload = self
            .data(self.authed(Method::PUT, "/api/auth/profile").await?.json(request))
            .await?;
        Ok(payload.user)
    }

    pub async fn verify(&self) -> Result<UserProfile, ClientError> {
        let payload: UserPayload = self.data(self.authed(Method::GET, "/api/auth/verify").await?).await?;
        Ok(payload.user)
    }

    pub async fn create_todo(&self, request: &CreateTodoRequest) -> Result<Todo, ClientError> {
        self.data(self.authed(Method::POST, "/api/todos").await?.json(request))
            .await
    }

    pub async fn list_todos(&self, query: &TodoListQuery) -> Result<TodoPage, ClientError> {
        self.data(self.authed(Method::GET, "/api/todos").await?.query(query))
            .await
    }

    pub async fn get_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.data(self.authed(Method::GET, &format!("/api/todos/{}", id)).await?)
            .await
    }

    pub async fn update_todo(&self, id: Uuid, request: &UpdateTodoRequest) -> Result<Todo, ClientError> {
        self.data(
            self.authed(Method::PUT, &format!("/api/todos/{}", id))
                .await?
                .json(request),
        )
        .await
    }

    pub async fn toggle_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        self.data(self.authed(Method::PATCH, &format!("/api/todos/{}/toggle", id)).await?)
            .await
    }

    pub async fn delete_todo(&self, id: Uuid) -> Result<(), ClientError> {
        self.send::<Value>(self.authed(Method::DELETE, &format!("/api/todos/{}", id)).await?)
            .await?;
        Ok(())
    }

    /// Returns how many completed todos were removed
    pub async fn delete_completed(&self) -> Result<u64, ClientError> {
        let deleted: DeletedCount = self
            .data(self.authed(Method::DELETE, "/api/todos/completed/all").await?)
            .await?;
        Ok(deleted.deleted_count)
    }

    pub async fn todo_stats(&self) -> Result<TodoStats, ClientError> {
        self.data(self.authed(Method::GET, "/api/todos/stats").await?).await
    }

    pub async fn overdue_todos(&self) -> Result<Vec<Todo>, ClientError> {
        self.data(self.authed(Method::GET, "/api/todos/overdue").await?).await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ClientError> {
        self.data(self.authed(Method::GET, "/api/admin/stats").await?).await
    }

    pub async fn admin_users(&self) -> Result<Vec<UserProfile>, ClientError> {
        self.data(self.authed(Method::GET, "/api/admin/users").await?).await
    }

    pub async fn admin_update_user(&self, id: Uuid, update: &AdminUserUpdate) -> Result<UserProfile, ClientError> {
        self.data(
            self.authed(Method::PATCH, &format!("/api/admin/users/{}", id))
                .await?
                .json(update),
        )
        .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.config.api_url(path))
    }

    async fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token().await.ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.send(request)
            .await?
            .data
            .ok_or_else(|| ClientError::UnexpectedResponse("missing data".to_string()))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("Server rejected the token, clearing it");
            self.tokens.lock().await.clear()?;
        }

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::UnexpectedResponse(e.to_string()));
            }
            Err(_) => return Err(failure(status, &body)),
        };

        if !envelope.success || !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
                errors: envelope.errors.unwrap_or_default(),
            });
        }

        Ok(envelope)
    }
}

/// Error for a non-success response whose body is not a typed envelope
fn failure(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiResponse<Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
    ClientError::Api {
        status: status.as_u16(),
        message,
        errors: Vec::new(),
    }
}
