//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Public view of a user: everything except the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub username: String,

    /// Email address
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Authentication response containing the user profile and token pair
///
/// Returned after successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Profile of the authenticated user
    pub user: UserProfile,

    /// JWT access token for API authentication
    pub access_token: String,

    /// Refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a user and a token pair
    pub fn from_token_pair(user: &User, tokens: TokenPair) -> Self {
        Self {
            user: UserProfile::from(user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_pair() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$10$hash".to_string(),
        );
        let pair = TokenPair::new("at".to_string(), "rt".to_string(), 3600);

        let response = AuthResponse::from_token_pair(&user, pair);

        assert_eq!(response.user.id, user.id);
        assert_eq!(response.access_token, "at");
        assert_eq!(response.refresh_token, "rt");
        assert_eq!(response.expires_in, 3600);
    }

    #[test]
    fn test_profile_has_no_hash() {
        let user = User::new(
            "bob".to_string(),
            "bob@example.com".to_string(),
            "$2b$10$hash".to_string(),
        );
        let profile = UserProfile::from(&user);
        let json = serde_json::to_string(&profile).unwrap();

        assert!(!json.contains("hash"));
        assert!(json.contains("bob@example.com"));
    }
}
