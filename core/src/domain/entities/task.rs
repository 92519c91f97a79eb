//! Task entity and workflow status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task entity owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task
    pub id: Uuid,

    /// Owning user; every read and mutation is scoped to this id
    pub user_id: Uuid,

    /// Short title, never empty
    pub title: String,

    /// Free-form description, empty when not provided
    pub description: String,

    /// Current workflow status
    pub status: TaskStatus,

    /// Timestamp when the task was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new Task instance
    pub fn new(user_id: Uuid, title: String, description: String, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Replaces the description
    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    /// Moves the task to a new workflow status
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let user_id = Uuid::new_v4();
        let task = Task::new(
            user_id,
            "Write report".to_string(),
            String::new(),
            TaskStatus::default(),
        );

        assert_eq!(task.user_id, user_id);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::Todo).unwrap(), "\"TODO\"");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );

        let parsed: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn test_set_status_touches_updated_at() {
        let mut task = Task::new(
            Uuid::new_v4(),
            "T1".to_string(),
            String::new(),
            TaskStatus::Todo,
        );
        let before = task.updated_at;

        task.set_status(TaskStatus::Completed);

        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.updated_at >= before);
    }
}
