//! Maps domain errors to HTTP responses.
//!
//! Every boundary operation funnels its `DomainError` through here; nothing
//! is allowed to crash the process for a single bad request. Internal error
//! detail is logged server-side and only echoed to the client in the
//! development environment.

use actix_web::HttpResponse;
use std::collections::HashMap;

use tb_core::errors::{AuthError, DomainError, TokenError};
use tb_shared::config::Environment;
use tb_shared::types::response::ErrorResponse;

/// Catch-all for failures that never became a `DomainError`
pub fn handle_error(error: anyhow::Error) -> HttpResponse {
    log::error!("API error: {:?}", error);

    let body = if Environment::from_env().is_development() {
        ErrorResponse::new("internal_error", error.to_string())
    } else {
        ErrorResponse::new("internal_error", "An unexpected error occurred")
    };
    HttpResponse::InternalServerError().json(body)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    log::debug!("Domain error: {:?}", error);

    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                "user_not_found",
                "User not found",
            )),
            AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
                "user_already_exists",
                "User with this email or username already exists",
            )),
            AuthError::InvalidCredentials => HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_credentials",
                "Invalid credentials",
            )),
            AuthError::AuthenticationFailed => HttpResponse::Unauthorized().json(
                ErrorResponse::new("authentication_failed", "Authentication failed"),
            ),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
                "token_expired",
                "Token expired",
            )),
            TokenError::InvalidTokenFormat => HttpResponse::Unauthorized().json(
                ErrorResponse::new("invalid_token", "Invalid token"),
            ),
            TokenError::InvalidRefreshToken => HttpResponse::Unauthorized().json(
                ErrorResponse::new("invalid_refresh_token", "Invalid refresh token"),
            ),
            TokenError::TokenGenerationFailed => {
                log::error!("Token generation failed");
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    "token_generation_failed",
                    "Failed to generate token",
                ))
            }
        },
        DomainError::ValidationErr(validation_error) => {
            let message = validation_error.to_string();
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} not found", resource),
        )),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            let body = if Environment::from_env().is_development() {
                ErrorResponse::new("internal_error", message)
            } else {
                ErrorResponse::new("internal_error", "An unexpected error occurred")
            };
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Convert request DTO validation failures into a 400 response
pub fn handle_validation_errors(errors: validator::ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    details.insert(
        "validation_errors".to_string(),
        serde_json::json!(errors),
    );

    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Invalid request data").with_details(details),
    )
}
