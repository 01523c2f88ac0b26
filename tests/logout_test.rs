//! Tests for token revocation

mod common;

use axum::http::header::AUTHORIZATION;
use common::{bearer, create_test_server, login_token, register_complete};
use serde_json::{json, Value};

/// Test: logout succeeds once, then reports the token as already revoked
#[tokio::test]
async fn test_double_logout() {
    let (server, _) = create_test_server();

    register_complete(&server, "logout@example.com", "testpassword", "lg").await;
    let token = login_token(&server, "logout@example.com", "testpassword").await;

    let response = server
        .post("/logout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Logout successful");

    let response = server
        .post("/logout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Token already revoked");
}

/// Test: logout without a bearer header is unauthorized
#[tokio::test]
async fn test_logout_missing_token() {
    let (server, _) = create_test_server();

    let response = server.post("/logout").await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Unauthorized - Missing token");
}

/// Test: logout performs no signature validation, any string is revocable
#[tokio::test]
async fn test_logout_accepts_any_string() {
    let (server, _) = create_test_server();

    let response = server
        .post("/logout")
        .add_header(AUTHORIZATION, bearer("not-a-real-token"))
        .await;

    assert_eq!(response.status_code(), 200);
}

/// Test: a revoked token no longer authorizes protected endpoints, even
/// though its signature is still valid
#[tokio::test]
async fn test_revoked_token_rejected_by_protected_route() {
    let (server, _) = create_test_server();

    let uid = register_complete(&server, "revoked@example.com", "testpassword", "rv").await;
    let token = login_token(&server, "revoked@example.com", "testpassword").await;

    server
        .post("/logout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    let response = server
        .post("/change-password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "uid": uid,
            "currentPassword": "testpassword",
            "newPassword": "newpassword",
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Unauthorized - Invalid token");
}
