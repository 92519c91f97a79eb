//! Repository interfaces for entity persistence, plus in-memory mocks for tests.

pub mod task;
pub mod token;
pub mod user;

pub use task::{MockTaskRepository, TaskRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
