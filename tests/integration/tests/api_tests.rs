//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, session_token, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.username, request.username);
    assert!(!auth.user_id.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/register", &request).await.unwrap();

    // Second registration with same username
    let response = server.post("/api/register", &request).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "alllowercase".to_string();

    let response = server.post("/api/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token = session_token(&response).unwrap();
    assert!(!token.is_empty());

    let auth: AuthResponse = response.json().await.unwrap();
    assert_eq!(auth.username, register_req.username);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();

    let login_req = LoginRequest {
        username: register_req.username.clone(),
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/api/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_revokes_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    let token = session_token(&response).unwrap();

    // Session works before logout
    let response = server.get_auth("/api/users", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/api/logout", &token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Revoked session is rejected
    let response = server.get_auth("/api/users", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

// ============================================================================
// User and Message Tests
// ============================================================================

#[tokio::test]
async fn test_users_requires_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_history_with_unknown_peer() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    let token = session_token(&response).unwrap();

    let response = server
        .get_auth("/api/messages/999999999999", &token)
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_history_bad_peer_id() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    let token = session_token(&response).unwrap();

    let response = server
        .get_auth("/api/messages/not-a-snowflake", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}
