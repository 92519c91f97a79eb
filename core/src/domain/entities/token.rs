//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "taskboard";

/// JWT audience
pub const JWT_AUDIENCE: &str = "taskboard-api";

/// Discriminates access tokens from refresh tokens so one kind can never
/// be presented where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Kind of credential this token represents
    pub token_type: TokenKind,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `expiry_minutes` - Access token lifetime in minutes
    pub fn new_access_token(user_id: Uuid, expiry_minutes: i64) -> Self {
        Self::new(user_id, TokenKind::Access, Duration::minutes(expiry_minutes))
    }

    /// Creates new claims for a refresh token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `expiry_days` - Refresh token lifetime in days
    pub fn new_refresh_token(user_id: Uuid, expiry_days: i64) -> Self {
        Self::new(user_id, TokenKind::Refresh, Duration::days(expiry_days))
    }

    fn new(user_id: Uuid, token_type: TokenKind, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// Only the SHA-256 hash of the token string is persisted. A row is valid
/// for use exactly while `now < expires_at`; expired rows are filtered out
/// at validation time rather than purged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hashed token value for security
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token with the default lifetime
    pub fn new(user_id: Uuid, token_hash: String) -> Self {
        let now = Utc::now();
        Self::new_with_expiry(user_id, token_hash, now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS))
    }

    /// Creates a new refresh token with an explicit expiry
    pub fn new_with_expiry(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token is valid for use
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, ACCESS_TOKEN_EXPIRY_MINUTES);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.token_type, TokenKind::Access);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_refresh_token(user_id, REFRESH_TOKEN_EXPIRY_DAYS);

        assert_eq!(claims.token_type, TokenKind::Refresh);
        assert!(claims.exp > claims.iat);
        assert!(claims.is_valid());
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, 60);

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, 60);

        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_token_kind_wire_format() {
        let json = serde_json::to_string(&TokenKind::Access).unwrap();
        assert_eq!(json, "\"access\"");
        let json = serde_json::to_string(&TokenKind::Refresh).unwrap();
        assert_eq!(json, "\"refresh\"");
    }

    #[test]
    fn test_refresh_token_creation() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new(user_id, "hashed_token_value".to_string());

        assert_eq!(token.user_id, user_id);
        assert_eq!(token.token_hash, "hashed_token_value");
        assert!(!token.is_expired());
        assert!(token.is_valid());
    }

    #[test]
    fn test_refresh_token_expiration() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::new_with_expiry(
            user_id,
            "hash".to_string(),
            Utc::now() - Duration::days(1),
        );

        assert!(token.is_expired());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 3600);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
        assert_eq!(deserialized.expires_in, 3600);
    }
}
