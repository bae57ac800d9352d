use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Client configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    app: AppConfig,
}

impl ClientConfig {
    /// `CLIENT_API_URL`, or the local development server
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Ok(url) = std::env::var("CLIENT_API_URL") {
            if !url.trim().is_empty() {
                builder = builder.server_url(url.trim());
            }
        }
        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }
}
