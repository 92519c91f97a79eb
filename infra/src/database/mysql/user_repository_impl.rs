//! MySQL implementation of the UserRepository trait.
//!
//! Concrete user persistence using MySQL with SQLx. Uniqueness of username
//! and email is backed by unique indexes; the duplicate-key error is mapped
//! to the domain conflict so concurrent registrations stay correct.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::user::User;
use tb_core::errors::{AuthError, DomainError};
use tb_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get username: {}", e) })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get password_hash: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find user by id: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find user by email: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // SQLSTATE 23000: unique index violation (duplicate username/email)
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return DomainError::Auth(AuthError::UserAlreadyExists);
                    }
                }
                DomainError::Internal { message: format!("Failed to create user: {}", e) }
            })?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to check email: {}", e) })?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::Internal { message: format!("Failed to read existence: {}", e) })?;

        Ok(present == 1)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?) AS present")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to check username: {}", e) })?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::Internal { message: format!("Failed to read existence: {}", e) })?;

        Ok(present == 1)
    }
}
