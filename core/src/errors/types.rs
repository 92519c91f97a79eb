//! Domain-specific error types for authentication and related operations
//!
//! These enums only carry the failure kind; HTTP status codes and response
//! bodies are assigned at the API boundary.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("Too short: {field} (min: {min})")]
    TooShort { field: String, min: usize },

    #[error("Invalid email")]
    InvalidEmail,
}
