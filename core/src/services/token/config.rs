//! Configuration for the token service

use tb_shared::config::AuthConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared authentication configuration
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            jwt_secret: config.jwt_secret().to_string(),
            access_token_expiry_minutes: config.access_token_expiry_seconds() / 60,
            refresh_token_expiry_days: config.refresh_token_expiry_seconds() / 86400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_auth_config() {
        let auth = AuthConfig::default();
        let config = TokenServiceConfig::from_auth_config(&auth);

        assert_eq!(config.access_token_expiry_minutes, 60);
        assert_eq!(config.refresh_token_expiry_days, 7);
    }
}
