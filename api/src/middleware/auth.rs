//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it, resolves the subject against the user store (a deleted
//! account invalidates its outstanding tokens immediately), and injects the
//! caller's identity into the request extensions for handlers to consume.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tb_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    repositories::{TokenRepository, UserRepository},
    services::token::TokenService,
};
use tb_shared::types::response::ErrorResponse;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        Ok(Self {
            user_id,
            jti: claims.jti,
        })
    }
}

/// Trait for wrapping the token service to allow dynamic dispatch
///
/// Keeps the middleware non-generic over the repository type.
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError>;
}

impl<R: TokenRepository + 'static> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// Dependencies the authentication middleware pulls from app data
pub struct AuthGate {
    verifier: Arc<dyn AccessTokenVerifier>,
    users: Arc<dyn UserRepository>,
}

impl AuthGate {
    /// Creates a new gate from a token verifier and a user store
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl Default for JwtAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let gate = match req.app_data::<web::Data<AuthGate>>() {
                Some(gate) => gate.clone(),
                None => {
                    return Err(unauthorized("auth_not_configured", "Authentication not configured"));
                }
            };

            // Extract token from Authorization header
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(unauthorized("unauthenticated", "Authentication required"));
                }
            };

            // Verify signature and expiry
            let claims = match gate.verifier.verify_access_token(&token) {
                Ok(claims) => claims,
                Err(DomainError::Token(TokenError::TokenExpired)) => {
                    return Err(unauthorized("token_expired", "Token expired"));
                }
                Err(_) => {
                    return Err(unauthorized("invalid_token", "Invalid token"));
                }
            };

            let auth_context = match AuthContext::from_claims(claims) {
                Ok(context) => context,
                Err(_) => {
                    return Err(unauthorized("invalid_token", "Invalid token"));
                }
            };

            // The subject must still exist in the credential store
            match gate.users.find_by_id(auth_context.user_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err(unauthorized("unauthenticated", "User not found"));
                }
                Err(e) => {
                    log::error!("Auth middleware user lookup failed: {}", e);
                    return Err(actix_web::error::ErrorInternalServerError(
                        "Internal server error",
                    ));
                }
            }

            // Inject auth context into request extensions
            req.extensions_mut().insert(auth_context);

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Builds a 401 error carrying the standard JSON error body
fn unauthorized(code: &str, message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(code, message));
    actix_web::error::InternalError::from_response(message.to_string(), response).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized("unauthenticated", "Authentication required"));

        ready(result)
    }
}
