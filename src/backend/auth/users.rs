/**
 * User Model and Database Operations
 *
 * `UserRow` mirrors the `users` table; `User` is the typed domain record
 * handed to the rest of the backend. The password hash never leaves this
 * layer except through `User::verify_password`, and `User::to_profile`
 * produces the public shape.
 */

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::password::{hash_password, verify_password};
use crate::shared::user::{full_name, NotificationPreferences};
use crate::shared::{Preferences, Role, SharedError, UserProfile};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, avatar, \
     theme, language, notify_email, notify_push, is_active, role, last_login, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar: Option<String>,
    theme: String,
    language: String,
    notify_email: bool,
    notify_push: bool,
    is_active: bool,
    role: String,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// User record as stored, including the password hash
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub preferences: Preferences,
    pub is_active: bool,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = SharedError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar: row.avatar,
            preferences: Preferences {
                theme: row.theme.parse()?,
                language: row.language.parse()?,
                notifications: NotificationPreferences {
                    email: row.notify_email,
                    push: row.notify_push,
                },
            },
            is_active: row.is_active,
            role: row.role.parse()?,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl User {
    pub fn full_name(&self) -> String {
        full_name(&self.username, self.first_name.as_deref(), self.last_name.as_deref())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn verify_password(&self, plain: &str) -> Result<bool, bcrypt::BcryptError> {
        verify_password(plain, &self.password_hash)
    }

    /// Public view, without the password hash
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            full_name: self.full_name(),
            avatar: self.avatar.clone(),
            preferences: self.preferences,
            is_active: self.is_active,
            role: self.role,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A user about to be inserted. Constructing one hashes the password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        bcrypt_cost: u32,
    ) -> Result<Self, bcrypt::BcryptError> {
        Ok(Self {
            username: username.into(),
            email: email.trim().to_lowercase(),
            password_hash: hash_password(password, bcrypt_cost)?,
            first_name,
            last_name,
        })
    }
}

/// Profile fields a user may change about themselves
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub email: Option<String>,
    pub preferences: Option<Preferences>,
}

fn into_user(row: UserRow) -> Result<User, sqlx::Error> {
    User::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn into_optional_user(row: Option<UserRow>) -> Result<Option<User>, sqlx::Error> {
    row.map(into_user).transpose()
}

/// Insert a new user with default preferences and role
pub async fn create_user(pool: &SqlitePool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let query = format!(
        "INSERT INTO users (id, username, email, password_hash, first_name, last_name, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    );

    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

    into_user(row)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    into_optional_user(row)
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    into_optional_user(row)
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;
    into_optional_user(row)
}

/// First user whose username or email matches
pub async fn find_by_username_or_email(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ? LIMIT 1");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(username)
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;
    into_optional_user(row)
}

/// Stamp `last_login` with the current time
pub async fn touch_last_login(pool: &SqlitePool, id: Uuid) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let query = format!("UPDATE users SET last_login = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_one(pool)
        .await?;
    into_user(row)
}

/// Apply a partial profile update; `None` when the user does not exist
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    changes: &ProfileChanges,
) -> Result<Option<User>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET updated_at = ");
    builder.push_bind(Utc::now());

    if let Some(first_name) = &changes.first_name {
        builder.push(", first_name = ").push_bind(first_name.clone());
    }
    if let Some(last_name) = &changes.last_name {
        builder.push(", last_name = ").push_bind(last_name.clone());
    }
    if let Some(email) = &changes.email {
        builder.push(", email = ").push_bind(email.trim().to_lowercase());
    }
    if let Some(preferences) = &changes.preferences {
        builder
            .push(", theme = ")
            .push_bind(preferences.theme.as_str())
            .push(", language = ")
            .push_bind(preferences.language.as_str())
            .push(", notify_email = ")
            .push_bind(preferences.notifications.email)
            .push(", notify_push = ")
            .push_bind(preferences.notifications.push);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING ").push(USER_COLUMNS);

    let row = builder.build_query_as::<UserRow>().fetch_optional(pool).await?;
    into_optional_user(row)
}

/// Admin-side update of role and active flag
pub async fn update_admin_fields(
    pool: &SqlitePool,
    id: Uuid,
    role: Option<Role>,
    is_active: Option<bool>,
) -> Result<Option<User>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET updated_at = ");
    builder.push_bind(Utc::now());

    if let Some(role) = role {
        builder.push(", role = ").push_bind(role.as_str());
    }
    if let Some(is_active) = is_active {
        builder.push(", is_active = ").push_bind(is_active);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING ").push(USER_COLUMNS);

    let row = builder.build_query_as::<UserRow>().fetch_optional(pool).await?;
    into_optional_user(row)
}

/// Promote a user to admin by username; `false` when nobody matched
pub async fn promote_to_admin(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE username = ?")
        .bind(Role::Admin.as_str())
        .bind(Utc::now())
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Most recently created users first
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, rowid DESC LIMIT ?");
    let rows = sqlx::query_as::<_, UserRow>(&query)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(into_user).collect()
}

/// `(total, active)` user counts
pub async fn count_users(pool: &SqlitePool) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>("SELECT COUNT(*), COALESCE(SUM(is_active), 0) FROM users")
        .fetch_one(pool)
        .await
}
