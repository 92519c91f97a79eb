//! User repository interface and mock implementation.

pub mod mock;
pub mod r#trait;

pub use mock::MockUserRepository;
pub use r#trait::UserRepository;
