//! MySQL repository implementations.

pub mod task_repository_impl;
pub mod token_repository_impl;
pub mod user_repository_impl;

pub use task_repository_impl::MySqlTaskRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
