//! Shared utilities and common types for the TaskBoard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Validation helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig};
pub use types::ErrorResponse;
pub use utils::validation;
