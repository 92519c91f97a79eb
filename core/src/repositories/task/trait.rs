//! Task repository trait defining the interface for task persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::task::Task;
use crate::errors::DomainError;

/// Repository trait for Task entity persistence operations
///
/// Every lookup and mutation is scoped to an owning user id. A task that
/// exists but belongs to another user is indistinguishable from a missing
/// one at this boundary, which is what keeps cross-user probing blind.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, task: Task) -> Result<Task, DomainError>;

    /// Find a task by id, visible only to its owner
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - Task found and owned by `user_id`
    /// * `Ok(None)` - No such task for this user
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, DomainError>;

    /// List all tasks owned by a user, newest first
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Task>, DomainError>;

    /// Persist changes to an existing task
    async fn update(&self, task: Task) -> Result<Task, DomainError>;

    /// Delete a task owned by a user
    ///
    /// # Returns
    /// * `Ok(true)` - Task was deleted
    /// * `Ok(false)` - No such task for this user
    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}
