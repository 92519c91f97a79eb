use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use tb_core::domain::entities::task::{Task, TaskStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1))]
    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Task as rendered on the wire; the owner id stays server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_parsing() {
        let request: CreateTaskRequest = serde_json::from_str(
            r#"{"title": "T1", "status": "TODO"}"#,
        )
        .unwrap();

        assert_eq!(request.title, "T1");
        assert_eq!(request.status, TaskStatus::Todo);
        assert!(request.description.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_unknown_status() {
        let result: Result<CreateTaskRequest, _> =
            serde_json::from_str(r#"{"title": "T1", "status": "DONE"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_empty_title_fails_validation() {
        let request = UpdateTaskRequest {
            title: Some(String::new()),
            description: None,
            status: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_task_response_wire_shape() {
        let task = Task::new(
            Uuid::new_v4(),
            "T1".to_string(),
            String::new(),
            TaskStatus::InProgress,
        );
        let json = serde_json::to_value(TaskResponse::from(task)).unwrap();

        assert_eq!(json["status"], "IN_PROGRESS");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("userId").is_none());
    }
}
