//! Main task service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::task::{Task, TaskStatus};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::TaskRepository;

use tb_shared::utils::validation;

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Partial update to a task; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Task service enforcing per-user data isolation
///
/// A task owned by another user is reported as missing, never as
/// forbidden, so existence is not leaked across accounts.
pub struct TaskService<K>
where
    K: TaskRepository,
{
    task_repository: Arc<K>,
}

impl<K> TaskService<K>
where
    K: TaskRepository,
{
    /// Create a new task service
    pub fn new(task_repository: Arc<K>) -> Self {
        Self { task_repository }
    }

    /// List all tasks owned by the user, newest first
    pub async fn list_tasks(&self, user_id: Uuid) -> DomainResult<Vec<Task>> {
        self.task_repository.find_by_user_id(user_id).await
    }

    /// Fetch a single task owned by the user
    pub async fn get_task(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<Task> {
        self.task_repository
            .find_by_id_for_user(task_id, user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "task".to_string(),
            })
    }

    /// Create a task for the user
    pub async fn create_task(&self, user_id: Uuid, input: NewTask) -> DomainResult<Task> {
        let title = input.title.trim().to_string();
        if !validation::not_empty(&title) {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "title".to_string(),
            }));
        }

        let task = Task::new(
            user_id,
            title,
            input.description.unwrap_or_default(),
            input.status,
        );

        tracing::debug!(task_id = %task.id, user_id = %user_id, "creating task");
        self.task_repository.create(task).await
    }

    /// Apply a partial update to a task owned by the user
    pub async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> DomainResult<Task> {
        let mut task = self.get_task(user_id, task_id).await?;

        if let Some(title) = changes.title {
            let title = title.trim().to_string();
            if !validation::not_empty(&title) {
                return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                    field: "title".to_string(),
                }));
            }
            task.set_title(title);
        }
        if let Some(description) = changes.description {
            task.set_description(description);
        }
        if let Some(status) = changes.status {
            task.set_status(status);
        }

        self.task_repository.update(task).await
    }

    /// Delete a task owned by the user
    pub async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<()> {
        let deleted = self.task_repository.delete_for_user(task_id, user_id).await?;
        if !deleted {
            return Err(DomainError::NotFound {
                resource: "task".to_string(),
            });
        }
        Ok(())
    }
}
