use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};

use super::super::AppState;

/// Handler for POST /auth/logout
///
/// Revokes the presented refresh token. Idempotent: logging out with a
/// token that was never issued, or was already revoked, still succeeds.
/// No access token is required; possession of the refresh token is the
/// only proof asked for.
///
/// # Responses
/// - 200 OK: `{"message": "Logout successful"}`
/// - 400 Bad Request: missing refresh token field
pub async fn logout<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logout successful".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
