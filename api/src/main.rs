use actix_web::{web, HttpServer};
use log::{info, warn};
use std::io;
use std::sync::Arc;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use app::create_app;
use middleware::auth::AuthGate;
use routes::AppState;

use tb_core::services::auth::{AuthService, AuthServiceConfig};
use tb_core::services::task::TaskService;
use tb_core::services::token::{TokenService, TokenServiceConfig};
use tb_infra::database::{
    DatabasePool, MySqlTaskRepository, MySqlTokenRepository, MySqlUserRepository,
};
use tb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting TaskBoard API server");

    // Load configuration
    let config = AppConfig::from_env();
    if config.auth.jwt.is_using_default_secret() && config.environment.is_production() {
        warn!("JWT_SECRET is not set; running production with the development secret");
    }

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Initialize database pool and repositories
    let pool = DatabasePool::new(config.database.clone())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let task_repository = Arc::new(MySqlTaskRepository::new(pool.get_pool().clone()));

    // Wire services
    let token_service = Arc::new(TokenService::new(
        MySqlTokenRepository::new(pool.get_pool().clone()),
        TokenServiceConfig::from_auth_config(&config.auth),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        token_service.clone(),
        AuthServiceConfig::default(),
    ));
    let task_service = Arc::new(TaskService::new(task_repository));

    let app_state = web::Data::new(AppState {
        auth_service,
        task_service,
    });
    let auth_gate = web::Data::new(AuthGate::new(token_service, user_repository));

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || create_app(app_state.clone(), auth_gate.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
