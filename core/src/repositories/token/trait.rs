//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// Tokens are hashed before storage; callers pass hashes, never raw token
/// strings. Expired rows are not purged here, only filtered by readers.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token to the repository
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token hash)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found (possibly expired)
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Database error occurred
    async fn find_refresh_token(&self, token_hash: &str)
        -> Result<Option<RefreshToken>, DomainError>;

    /// Delete a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(true)` - Token was deleted
    /// * `Ok(false)` - No row matched (already deleted or never existed)
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<bool, DomainError>;
}
