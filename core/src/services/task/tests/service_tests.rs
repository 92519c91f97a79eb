//! Unit tests for the task service

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::task::TaskStatus;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::MockTaskRepository;
use crate::services::task::{NewTask, TaskChanges, TaskService};

fn service() -> TaskService<MockTaskRepository> {
    TaskService::new(Arc::new(MockTaskRepository::new()))
}

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        status: TaskStatus::Todo,
    }
}

#[tokio::test]
async fn test_create_and_list_roundtrip() {
    let service = service();
    let user = Uuid::new_v4();

    let created = service.create_task(user, new_task("T1")).await.unwrap();
    let listed = service.list_tasks(user).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "T1");
    assert_eq!(listed[0].description, "");
    assert_eq!(listed[0].status, TaskStatus::Todo);
}

#[tokio::test]
async fn test_create_requires_title() {
    let service = service();

    let result = service.create_task(Uuid::new_v4(), new_task("   ")).await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_update_status_and_fetch() {
    let service = service();
    let user = Uuid::new_v4();
    let created = service.create_task(user, new_task("T1")).await.unwrap();

    service
        .update_task(
            user,
            created.id,
            TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let fetched = service.get_task(user, created.id).await.unwrap();
    assert_eq!(fetched.status, TaskStatus::Completed);
    assert_eq!(fetched.title, "T1");
}

#[tokio::test]
async fn test_update_rejects_empty_title() {
    let service = service();
    let user = Uuid::new_v4();
    let created = service.create_task(user, new_task("T1")).await.unwrap();

    let result = service
        .update_task(
            user,
            created.id,
            TaskChanges {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_then_list_is_empty() {
    let service = service();
    let user = Uuid::new_v4();
    let created = service.create_task(user, new_task("T1")).await.unwrap();

    service.delete_task(user, created.id).await.unwrap();

    assert!(service.list_tasks(user).await.unwrap().is_empty());

    // Deleting again reports the task as missing
    let result = service.delete_task(user, created.id).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_foreign_task_is_invisible() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let created = service.create_task(owner, new_task("private")).await.unwrap();

    // Reads, updates, and deletes by another user all report NotFound
    assert!(matches!(
        service.get_task(stranger, created.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .update_task(
                stranger,
                created.id,
                TaskChanges {
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete_task(stranger, created.id).await,
        Err(DomainError::NotFound { .. })
    ));

    // And the owner's task is untouched
    let fetched = service.get_task(owner, created.id).await.unwrap();
    assert_eq!(fetched.status, TaskStatus::Todo);
}

#[tokio::test]
async fn test_listing_is_per_user() {
    let service = service();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    service.create_task(alice, new_task("a1")).await.unwrap();
    service.create_task(bob, new_task("b1")).await.unwrap();

    let alice_tasks = service.list_tasks(alice).await.unwrap();
    assert_eq!(alice_tasks.len(), 1);
    assert_eq!(alice_tasks[0].title, "a1");
}
