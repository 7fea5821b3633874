//! Test utilities for integration testing
use crate::api::models::{auth::LoginResponse, modelos::ModeloResponse};
use crate::config::Config;
use crate::{AppState, build_router};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

pub const TEST_SECRET_KEY: &str = "test-secret-key-for-jwt";

pub fn create_test_config() -> Config {
    Config {
        secret_key: Some(TEST_SECRET_KEY.to_string()),
        ..Config::default()
    }
}

pub fn create_test_state() -> AppState {
    AppState::from_config(create_test_config()).expect("Failed to create test state")
}

/// A server over a fresh, empty table
pub fn create_test_server() -> TestServer {
    create_test_server_with_state(create_test_state())
}

/// A server sharing `state`, so tests can inspect the table or mint tokens directly
pub fn create_test_server_with_state(state: AppState) -> TestServer {
    let router = build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

/// Log in as the seeded admin user and return the token
pub async fn login_token(server: &TestServer) -> String {
    let response = server
        .post("/api/login")
        .json(&serde_json::json!({"username": "admin", "password": "admin"}))
        .await;
    response.assert_status_ok();
    response.json::<LoginResponse>().token
}

pub async fn create_modelo(server: &TestServer, token: &str, body: Value) -> ModeloResponse {
    let response = server.post("/api/modelos").authorization_bearer(token).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

pub async fn list_modelos(server: &TestServer, token: &str) -> Vec<ModeloResponse> {
    let response = server.get("/api/modelos").authorization_bearer(token).await;
    response.assert_status_ok();
    response.json()
}
