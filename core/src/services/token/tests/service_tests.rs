//! Unit tests for the token service

use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: "test_secret".to_string(),
        ..Default::default()
    }
}

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(MockTokenRepository::new(), test_config())
}

#[tokio::test]
async fn test_issued_access_token_verifies() {
    let service = service();
    let user_id = Uuid::new_v4();

    let pair = service.issue_tokens(user_id).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.token_type, TokenKind::Access);
    assert_eq!(pair.expires_in, 3600);
}

#[tokio::test]
async fn test_refresh_token_rejected_as_access_token() {
    let service = service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    let result = service.verify_access_token(&pair.refresh_token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[tokio::test]
async fn test_access_token_rejected_as_refresh_token() {
    let service = service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    let result = service.refresh_access_token(&pair.access_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_expired_access_token_fails_as_expired() {
    // Negative lifetime puts the expiry safely past the decoder's leeway
    let config = TokenServiceConfig {
        jwt_secret: "test_secret".to_string(),
        access_token_expiry_minutes: -5,
        ..Default::default()
    };
    let service = TokenService::new(MockTokenRepository::new(), config);

    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();
    let result = service.verify_access_token(&pair.access_token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[tokio::test]
async fn test_garbage_token_is_malformed() {
    let service = service();

    let result = service.verify_access_token("not.a.jwt");

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let issuing = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            jwt_secret: "other_secret".to_string(),
            ..Default::default()
        },
    );
    let verifying = service();

    let pair = issuing.issue_tokens(Uuid::new_v4()).await.unwrap();

    assert!(verifying.verify_access_token(&pair.access_token).is_err());
}

#[tokio::test]
async fn test_refresh_yields_independently_valid_access_token() {
    let service = service();
    let user_id = Uuid::new_v4();

    let pair = service.issue_tokens(user_id).await.unwrap();
    let new_access = service.refresh_access_token(&pair.refresh_token).await.unwrap();

    let claims = service.verify_access_token(&new_access).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[tokio::test]
async fn test_refresh_does_not_rotate_refresh_token() {
    let service = service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    // The same refresh token stays valid across multiple refreshes
    service.refresh_access_token(&pair.refresh_token).await.unwrap();
    service.refresh_access_token(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_refresh_with_unknown_token_fails() {
    let service = service();
    let other = TokenService::new(MockTokenRepository::new(), test_config());

    // Well-formed and correctly signed, but never persisted by `service`
    let pair = other.issue_tokens(Uuid::new_v4()).await.unwrap();

    let result = service.refresh_access_token(&pair.refresh_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_refresh_with_expired_stored_token_fails() {
    let config = TokenServiceConfig {
        jwt_secret: "test_secret".to_string(),
        refresh_token_expiry_days: -1,
        ..Default::default()
    };
    let service = TokenService::new(MockTokenRepository::new(), config);

    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();
    let result = service.refresh_access_token(&pair.refresh_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_revoked_refresh_token_cannot_refresh() {
    let service = service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    assert!(service.revoke_refresh_token(&pair.refresh_token).await.unwrap());

    let result = service.refresh_access_token(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let service = service();
    let pair = service.issue_tokens(Uuid::new_v4()).await.unwrap();

    assert!(service.revoke_refresh_token(&pair.refresh_token).await.unwrap());
    // Second revocation matches nothing but does not error
    assert!(!service.revoke_refresh_token(&pair.refresh_token).await.unwrap());
}

#[tokio::test]
async fn test_issued_refresh_token_is_stored_hashed() {
    let service = service();
    let user_id = Uuid::new_v4();

    let pair = service.issue_tokens(user_id).await.unwrap();

    // The raw token string never appears in the repository
    let raw_lookup = service
        .repository
        .find_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    assert!(raw_lookup.is_none());

    let hashed_lookup = service
        .repository
        .find_refresh_token(&service.hash_token(&pair.refresh_token))
        .await
        .unwrap();
    assert_eq!(hashed_lookup.unwrap().user_id, user_id);
}
