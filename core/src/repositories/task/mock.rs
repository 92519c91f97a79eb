//! In-memory implementation of TaskRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::task::Task;
use crate::errors::DomainError;

use super::r#trait::TaskRepository;

/// Mock task repository backed by a HashMap
pub struct MockTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MockTaskRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .get(&id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, task: Task) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(task)
            }
            None => Err(DomainError::NotFound {
                resource: "task".to_string(),
            }),
        }
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&id) {
            Some(task) if task.user_id == user_id => {
                tasks.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
