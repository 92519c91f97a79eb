//! Application factory
//!
//! Builds the Actix-web application with all routes and middleware wired
//! against the injected application state.

use actix_web::{body::MessageBody, middleware::Logger, web, App, HttpResponse};

use crate::middleware::{auth::AuthGate, auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{login::login, logout::logout, refresh::refresh, register::register};
use crate::routes::tasks::handlers::{
    create_task, delete_task, get_task, list_tasks, update_task,
};
use crate::routes::AppState;

use tb_core::repositories::{TaskRepository, TokenRepository, UserRepository};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, K>(
    app_state: web::Data<AppState<U, T, K>>,
    auth_gate: web::Data<AuthGate>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    K: TaskRepository + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(auth_gate)
        // Add middleware
        .wrap(Logger::default())
        .wrap(create_cors())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Auth routes (public)
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<U, T, K>))
                .route("/login", web::post().to(login::<U, T, K>))
                .route("/refresh-token", web::post().to(refresh::<U, T, K>))
                .route("/logout", web::post().to(logout::<U, T, K>)),
        )
        // Task routes (bearer-protected)
        .service(
            web::scope("/tasks")
                .wrap(JwtAuth::new())
                .route("", web::get().to(list_tasks::<U, T, K>))
                .route("", web::post().to(create_task::<U, T, K>))
                .route("/{id}", web::get().to(get_task::<U, T, K>))
                .route("/{id}", web::put().to(update_task::<U, T, K>))
                .route("/{id}", web::delete().to(delete_task::<U, T, K>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "taskboard-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
