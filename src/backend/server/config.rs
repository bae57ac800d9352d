/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables (optionally seeded from a `.env` file by the
 * binary), and opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * | Variable | Default |
 * |---|---|
 * | `DATABASE_URL` | `sqlite://todo.db?mode=rwc` |
 * | `DATABASE_MAX_CONNECTIONS` | `5` |
 * | `JWT_SECRET` | development fallback (required in production) |
 * | `JWT_EXPIRES_IN_DAYS` | `7` |
 * | `BCRYPT_COST` | `12` |
 * | `SERVER_PORT` | `5000` |
 * | `APP_ENV` | `development` |
 * | `CORS_ORIGINS` | local dev origins |
 * | `STATIC_DIR` | unset |
 * | `ADMIN_BOOTSTRAP_USERNAME` | unset |
 *
 * # Error Handling
 *
 * Unlike optional integrations, the database and signing secret are
 * required: a malformed value is a `ConfigError` and the server refuses
 * to start.
 */

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::shared::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";
const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:2000,http://localhost:3001";

/// Deployment environment, from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidValue {
                name: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token signing and password hashing parameters
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_days: i64, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::days(token_ttl_days),
            bcrypt_cost,
        }
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Everything the server needs to boot
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth: AuthSettings,
    pub port: u16,
    pub environment: Environment,
    pub cors_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub admin_bootstrap_username: Option<String>,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment: Environment = match non_empty_var("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };

        let jwt_secret = match non_empty_var("JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::MissingValue("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development fallback secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let token_ttl_days: i64 = parse_var("JWT_EXPIRES_IN_DAYS", 7)?;
        if token_ttl_days < 1 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRES_IN_DAYS",
                value: token_ttl_days.to_string(),
            });
        }

        let bcrypt_cost: u32 = parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let mut cors_origins: Vec<String> = non_empty_var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        if environment == Environment::Development && non_empty_var("CORS_ORIGINS").is_none() {
            cors_origins.push("http://localhost:5173".to_string());
        }

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            auth: AuthSettings::new(jwt_secret, token_ttl_days, bcrypt_cost),
            port: parse_var("SERVER_PORT", 5000)?,
            environment,
            cors_origins,
            static_dir: non_empty_var("STATIC_DIR").map(PathBuf::from),
            admin_bootstrap_username: non_empty_var("ADMIN_BOOTSTRAP_USERNAME"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(default),
    }
}

/// Open the SQLite pool and run the embedded migrations
///
/// `sqlite::memory:` gets a single long-lived connection, since every new
/// connection to an in-memory database starts out empty.
pub async fn load_database(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if database_url.contains(":memory:") {
        return connect_in_memory().await;
    }

    tracing::info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// In-memory database with the schema applied
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(IN_MEMORY_DATABASE_URL)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
