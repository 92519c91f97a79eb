//! Route handlers for the HTTP surface.

pub mod auth;
pub mod tasks;

use std::sync::Arc;

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};
use tb_core::services::auth::AuthService;
use tb_core::services::task::TaskService;

/// Application state that holds the shared services
///
/// Constructed once at startup and cloned (cheaply, behind `web::Data`)
/// into every worker.
pub struct AppState<U, T, K>
where
    U: UserRepository,
    T: TokenRepository,
    K: TaskRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub task_service: Arc<TaskService<K>>,
}
