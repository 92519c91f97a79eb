//! Password hashing helpers
//!
//! Thin wrappers over bcrypt that keep the hashing primitive swappable and
//! map library failures into the domain error space.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Compare a plaintext password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    verify(password, password_hash).map_err(|e| DomainError::Internal {
        message: format!("Password verification failed: {}", e),
    })
}
