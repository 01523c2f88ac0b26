//! Tests for the password-change flow

mod common;

use axum::http::header::AUTHORIZATION;
use common::{bearer, create_test_server, login_token, register_complete};
use serde_json::{json, Value};

/// Test: change-password requires a session token
#[tokio::test]
async fn test_change_password_requires_auth() {
    let (server, _) = create_test_server();

    let response = server
        .post("/change-password")
        .json(&json!({
            "uid": "u1",
            "currentPassword": "old",
            "newPassword": "new",
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Unauthorized - Missing token");
}

/// Test: a garbage token is rejected by the middleware
#[tokio::test]
async fn test_change_password_invalid_token() {
    let (server, _) = create_test_server();

    let response = server
        .post("/change-password")
        .add_header(AUTHORIZATION, bearer("garbage"))
        .json(&json!({
            "uid": "u1",
            "currentPassword": "old",
            "newPassword": "new",
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["message"], "Unauthorized - Invalid token");
}

/// Test: wrong current password is a 400, not an auth failure
#[tokio::test]
async fn test_change_password_wrong_current() {
    let (server, _) = create_test_server();

    let uid = register_complete(&server, "chpw@example.com", "oldpassword", "ch").await;
    let token = login_token(&server, "chpw@example.com", "oldpassword").await;

    let response = server
        .post("/change-password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "uid": uid,
            "currentPassword": "notthepassword",
            "newPassword": "newpassword",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Current password is incorrect");
}

/// Test: after a change, the old password stops working and the new works
#[tokio::test]
async fn test_change_password_switches_credentials() {
    let (server, _) = create_test_server();

    let uid = register_complete(&server, "switch@example.com", "oldpassword", "sw").await;
    let token = login_token(&server, "switch@example.com", "oldpassword").await;

    let response = server
        .post("/change-password")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "uid": uid,
            "currentPassword": "oldpassword",
            "newPassword": "newpassword",
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    // Old password no longer validates
    let response = server
        .post("/login")
        .json(&json!({ "email": "switch@example.com", "password": "oldpassword" }))
        .await;
    assert_eq!(response.status_code(), 401);

    // New password does
    let response = server
        .post("/login")
        .json(&json!({ "email": "switch@example.com", "password": "newpassword" }))
        .await;
    assert_eq!(response.status_code(), 200);
}
