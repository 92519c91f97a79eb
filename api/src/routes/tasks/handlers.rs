use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::task::{CreateTaskRequest, DeleteTaskResponse, TaskResponse, UpdateTaskRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};
use tb_core::services::task::{NewTask, TaskChanges};

use super::super::AppState;

/// Handler for GET /tasks
///
/// Lists the caller's tasks, newest first.
pub async fn list_tasks<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    match state.task_service.list_tasks(auth.user_id).await {
        Ok(tasks) => {
            let body: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /tasks/{id}
///
/// Fetches one of the caller's tasks. A task owned by someone else is
/// reported as missing, not forbidden.
pub async fn get_task<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    match state
        .task_service
        .get_task(auth.user_id, path.into_inner())
        .await
    {
        Ok(task) => HttpResponse::Ok().json(TaskResponse::from(task)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /tasks
///
/// Creates a task owned by the caller.
///
/// # Request Body
///
/// ```json
/// {
///     "title": "Write report",
///     "description": "optional",
///     "status": "TODO"
/// }
/// ```
pub async fn create_task<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    auth: AuthContext,
    request: web::Json<CreateTaskRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let input = NewTask {
        title: request.title,
        description: request.description,
        status: request.status,
    };

    match state.task_service.create_task(auth.user_id, input).await {
        Ok(task) => HttpResponse::Created().json(TaskResponse::from(task)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /tasks/{id}
///
/// Applies a partial update; absent fields keep their current value.
pub async fn update_task<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTaskRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let changes = TaskChanges {
        title: request.title,
        description: request.description,
        status: request.status,
    };

    match state
        .task_service
        .update_task(auth.user_id, path.into_inner(), changes)
        .await
    {
        Ok(task) => HttpResponse::Ok().json(TaskResponse::from(task)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /tasks/{id}
pub async fn delete_task<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    match state
        .task_service
        .delete_task(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(DeleteTaskResponse {
            message: "Task deleted successfully".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
