//! MySQL implementation of the TaskRepository trait.
//!
//! Concrete task persistence using MySQL with SQLx. Every query is scoped
//! to the owning user id; rows owned by other users are never observable
//! through this interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::task::{Task, TaskStatus};
use tb_core::errors::DomainError;
use tb_core::repositories::TaskRepository;

/// MySQL implementation of TaskRepository
pub struct MySqlTaskRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTaskRepository {
    /// Create a new MySQL task repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn status_to_str(status: TaskStatus) -> &'static str {
        match status {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    fn status_from_str(status: &str) -> TaskStatus {
        match status {
            "IN_PROGRESS" => TaskStatus::InProgress,
            "COMPLETED" => TaskStatus::Completed,
            _ => TaskStatus::Todo,
        }
    }

    /// Convert database row to Task entity
    fn row_to_task(row: &sqlx::mysql::MySqlRow) -> Result<Task, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get user_id: {}", e) })?;

        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get status: {}", e) })?;

        Ok(Task {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid task UUID: {}", e) })?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid user UUID: {}", e) })?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get title: {}", e) })?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get description: {}", e) })?,
            status: Self::status_from_str(&status),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl TaskRepository for MySqlTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, DomainError> {
        let query = r#"
            INSERT INTO tasks (id, user_id, title, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(task.id.to_string())
            .bind(task.user_id.to_string())
            .bind(&task.title)
            .bind(&task.description)
            .bind(Self::status_to_str(task.status))
            .bind(task.created_at)
            .bind(task.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to create task: {}", e) })?;

        Ok(task)
    }

    async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = ? AND user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find task: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Task>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE user_id = ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to list tasks: {}", e) })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(Self::row_to_task(&row)?);
        }

        Ok(tasks)
    }

    async fn update(&self, task: Task) -> Result<Task, DomainError> {
        let query = r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&task.title)
            .bind(&task.description)
            .bind(Self::status_to_str(task.status))
            .bind(task.updated_at)
            .bind(task.id.to_string())
            .bind(task.user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to update task: {}", e) })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "task".to_string(),
            });
        }

        Ok(task)
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM tasks WHERE id = ? AND user_id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to delete task: {}", e) })?;

        Ok(result.rows_affected() > 0)
    }
}
