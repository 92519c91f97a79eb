use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthSuccessResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};

use super::super::AppState;

/// Handler for POST /auth/register
///
/// Registers a new user account and opens a session.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "email": "alice@example.com",
///     "password": "secret1"
/// }
/// ```
///
/// # Responses
/// - 201 Created: profile plus access and refresh tokens
/// - 400 Bad Request: invalid username/email/password shape
/// - 409 Conflict: username or email already registered
pub async fn register<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Created().json(AuthSuccessResponse {
            message: "User registered successfully".to_string(),
            user: auth.user,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
