//! Integration tests for the task endpoints: lifecycle and per-user isolation

use actix_web::{http::header, test, web};
use std::sync::Arc;

use tb_api::app::create_app;
use tb_api::middleware::auth::AuthGate;
use tb_api::routes::AppState;
use tb_core::domain::value_objects::AuthResponse;
use tb_core::repositories::{MockTaskRepository, MockTokenRepository, MockUserRepository};
use tb_core::services::auth::{AuthService, AuthServiceConfig};
use tb_core::services::task::TaskService;
use tb_core::services::token::{TokenService, TokenServiceConfig};

type TestState = AppState<MockUserRepository, MockTokenRepository, MockTaskRepository>;

fn test_state() -> (web::Data<TestState>, web::Data<AuthGate>) {
    let user_repo = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            jwt_secret: "test_secret".to_string(),
            ..Default::default()
        },
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        token_service.clone(),
        AuthServiceConfig::default(),
    ));
    let task_service = Arc::new(TaskService::new(Arc::new(MockTaskRepository::new())));

    let state = web::Data::new(AppState {
        auth_service,
        task_service,
    });
    let gate = web::Data::new(AuthGate::new(token_service, user_repo));

    (state, gate)
}

/// Seeds an account through the service layer and returns its session
async fn register_user(state: &web::Data<TestState>, username: &str, email: &str) -> AuthResponse {
    state
        .auth_service
        .register(username, email, "secret1")
        .await
        .unwrap()
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_task_lifecycle_roundtrip() {
    let (state, gate) = test_state();
    let session = register_user(&state, "alice", "alice@example.com").await;
    let token = session.access_token;
    let app = test::init_service(create_app(state, gate)).await;

    // Create
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({"title": "T1", "status": "TODO"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let task_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "TODO");
    assert_eq!(created["description"], "");

    // List returns exactly the one task
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "T1");

    // Update status to COMPLETED
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({"status": "COMPLETED"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Get reflects the new status
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["status"], "COMPLETED");
    assert_eq!(fetched["title"], "T1");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // List is empty again
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_tasks_require_authentication() {
    let (state, gate) = test_state();
    let app = test::init_service(create_app(state, gate)).await;

    let req = test::TestRequest::get().uri("/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(serde_json::json!({"title": "T1", "status": "TODO"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_garbage_bearer_token_is_401() {
    let (state, gate) = test_state();
    let app = test::init_service(create_app(state, gate)).await;

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_create_task_without_title_is_400() {
    let (state, gate) = test_state();
    let session = register_user(&state, "alice", "alice@example.com").await;
    let app = test::init_service(create_app(state, gate)).await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&session.access_token))
        .set_json(serde_json::json!({"title": "", "status": "TODO"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn test_cross_user_isolation_yields_404() {
    let (state, gate) = test_state();
    let alice = register_user(&state, "alice", "alice@example.com").await;
    let bob = register_user(&state, "bob", "bob@example.com").await;
    let app = test::init_service(create_app(state, gate)).await;

    // Alice creates a task
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(&alice.access_token))
        .set_json(serde_json::json!({"title": "private", "status": "TODO"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: serde_json::Value = test::read_body_json(resp).await;
    let task_id = created["id"].as_str().unwrap().to_string();

    // Bob cannot see it in his list
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(&bob.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert!(listed.as_array().unwrap().is_empty());

    // Reads, updates, and deletes through Bob's token all 404, never 403
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&bob.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&bob.access_token))
        .set_json(serde_json::json!({"status": "COMPLETED"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&bob.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // Alice's task is untouched
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(bearer(&alice.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["status"], "TODO");
}
