use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthSuccessResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};

use super::super::AppState;

/// Handler for POST /auth/login
///
/// Authenticates an existing user and opens a session. Each login issues a
/// fresh token pair; sessions on other devices stay valid.
///
/// # Responses
/// - 200 OK: profile plus access and refresh tokens
/// - 400 Bad Request: malformed input or wrong password
/// - 404 Not Found: no account with that email
pub async fn login<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(AuthSuccessResponse {
            message: "Login successful".to_string(),
            user: auth.user,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
