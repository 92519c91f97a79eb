//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

use tb_shared::utils::validation;

/// Authentication service orchestrating the complete session lifecycle
///
/// This is the only writer of refresh token records and the only component
/// that ever sees plaintext passwords.
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new user account
    ///
    /// This method:
    /// 1. Validates username, email, and password shape
    /// 2. Rejects usernames and emails that are already taken
    /// 3. Hashes the password and creates the user
    /// 4. Issues an access/refresh token pair, persisting the refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Profile plus token pair; the hash never leaves
    /// * `Err(DomainError)` - Validation failure, conflict, or internal error
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        let username = username.trim();
        let email = email.trim();

        // Step 1: Validate input shape
        if !validation::is_valid_username(username) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                field: "username".to_string(),
            }));
        }
        if !validation::is_valid_email(email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(DomainError::ValidationErr(ValidationError::TooShort {
                field: "password".to_string(),
                min: self.config.min_password_length,
            }));
        }

        // Step 2: Username and email must both be globally unique
        if self.user_repository.exists_by_username(username).await? {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }
        if self.user_repository.exists_by_email(email).await? {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        // Step 3: Hash the password and create the account
        let password_hash = hash_password(password)?;
        let user = self
            .user_repository
            .create(User::new(username.to_string(), email.to_string(), password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "registered new user");

        // Step 4: Issue the token pair
        let tokens = self.token_service.issue_tokens(user.id).await?;
        Ok(AuthResponse::from_token_pair(&user, tokens))
    }

    /// Authenticate an existing user with email and password
    ///
    /// A missing account and a wrong password are reported differently
    /// (`UserNotFound` vs `InvalidCredentials`), mirroring the API contract.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Profile plus a fresh token pair
    /// * `Err(DomainError)` - Lookup, credential, or issuance failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = self
            .user_repository
            .find_by_email(email.trim())
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        tracing::debug!(user_id = %user.id, "login succeeded");

        // Each login issues a fresh pair; earlier refresh tokens stay valid
        // so other devices keep their sessions
        let tokens = self.token_service.issue_tokens(user.id).await?;
        Ok(AuthResponse::from_token_pair(&user, tokens))
    }

    /// Exchange a refresh token for a new access token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new access token
    /// * `Err(DomainError)` - The refresh token did not verify or is unknown
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<String> {
        self.token_service.refresh_access_token(refresh_token).await
    }

    /// Log out by revoking the presented refresh token
    ///
    /// Idempotent: logging out with an unknown or already-revoked token
    /// succeeds. No access token is required.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let deleted = self.token_service.revoke_refresh_token(refresh_token).await?;
        if !deleted {
            tracing::debug!("logout matched no stored refresh token");
        }
        Ok(())
    }

    /// Access token lifetime in seconds, for response payloads
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.token_service.access_token_ttl_seconds()
    }
}
