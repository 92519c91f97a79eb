use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RefreshResponse, RefreshTokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};

use super::super::AppState;

/// Handler for POST /auth/refresh-token
///
/// Exchanges a valid refresh token for a new access token. The refresh
/// token itself is not rotated and stays usable until its expiry or an
/// explicit logout.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "string"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{"accessToken": "..."}`
/// - 401 Unauthorized: unknown, expired, or malformed refresh token
pub async fn refresh<U, T, K>(
    state: web::Data<AppState<U, T, K>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(access_token) => HttpResponse::Ok().json(RefreshResponse { access_token }),
        Err(error) => handle_domain_error(error),
    }
}
