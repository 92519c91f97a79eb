//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TaskBoard
//! application, following Clean Architecture principles. It provides the
//! MySQL-backed implementations of the repository traits defined in
//! `tb_core`, plus connection pool management.

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlTaskRepository, MySqlTokenRepository, MySqlUserRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
