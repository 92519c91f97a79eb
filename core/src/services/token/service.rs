//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, RefreshToken, TokenKind, TokenPair, JWT_AUDIENCE, JWT_ISSUER,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for managing JWT access tokens and stored refresh tokens
///
/// Access tokens are verified statelessly from their signature and expiry.
/// Refresh tokens are also signed JWTs, but every issued one is recorded
/// (as a SHA-256 hash) so it can be revoked; a refresh token is only
/// honored while its stored row exists and is unexpired.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for refresh token persistence
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    ///
    /// The refresh token is persisted (hashed) with its expiry so it can be
    /// revoked on logout.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(DomainError)` - Token generation or persistence failed
    pub async fn issue_tokens(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(user_id)?;

        let refresh_claims =
            Claims::new_refresh_token(user_id, self.config.refresh_token_expiry_days);
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        let expires_at = Utc::now() + Duration::days(self.config.refresh_token_expiry_days);
        let record =
            RefreshToken::new_with_expiry(user_id, self.hash_token(&refresh_token), expires_at);

        self.repository
            .save_refresh_token(record)
            .await
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_minutes * 60,
        ))
    }

    /// Generates an access token
    fn generate_access_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(user_id, self.config.access_token_expiry_minutes);
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Stateless: only the signature, expiry, and claim set are checked.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is expired, malformed, or the wrong kind
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidTokenFormat)
                }
            })?;

        if token_data.claims.token_type != TokenKind::Access {
            return Err(DomainError::Token(TokenError::InvalidTokenFormat));
        }

        Ok(token_data.claims)
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The refresh token must decode as a refresh-kind JWT, and a matching
    /// unexpired stored row must exist for the decoded user. The refresh
    /// token itself is not rotated; it stays valid until its own expiry or
    /// an explicit logout.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A freshly minted access token
    /// * `Err(DomainError)` - `InvalidRefreshToken` for every failure mode
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, DomainError> {
        let token_data = decode::<Claims>(refresh_token, &self.decoding_key, &self.validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;

        if token_data.claims.token_type != TokenKind::Refresh {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let user_id = token_data
            .claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;

        let token_hash = self.hash_token(refresh_token);
        let stored = self
            .repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if stored.user_id != user_id || stored.is_expired() {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        self.generate_access_token(user_id)
    }

    /// Revokes a refresh token by deleting its stored row
    ///
    /// Idempotent: revoking an unknown token reports `false`, never an error.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - True if a row was deleted, false if none matched
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<bool, DomainError> {
        let token_hash = self.hash_token(refresh_token);
        self.repository.delete_refresh_token(&token_hash).await
    }

    /// Access token lifetime in seconds, as advertised to clients
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.config.access_token_expiry_minutes * 60
    }

    /// Hashes a token for storage and lookup
    pub(crate) fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
