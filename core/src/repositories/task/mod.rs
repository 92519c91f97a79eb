//! Task repository interface and mock implementation.

pub mod mock;
pub mod r#trait;

pub use mock::MockTaskRepository;
pub use r#trait::TaskRepository;
