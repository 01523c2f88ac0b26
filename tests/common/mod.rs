//! Common test utilities for integration tests

#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum_test::TestServer;
use mindbloom_backend::{
    routes, AppState, InMemoryCredentialStore, InMemoryDocumentStore, Notifier, TokenService,
};
use serde_json::{json, Value};

/// Notifier that captures dispatched codes instead of sending mail
#[derive(Default, Clone)]
pub struct MockNotifier {
    /// Captured (email, code) pairs
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the last code dispatched to an email
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == email)
            .map(|(_, c)| c.clone())
    }
}

impl Notifier for MockNotifier {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        self.sent
            .write()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Create a test server with in-memory stores and a capturing notifier
pub fn create_test_server() -> (TestServer, MockNotifier) {
    let notifier = MockNotifier::new();

    let state = Arc::new(AppState::new(
        InMemoryCredentialStore::new(),
        InMemoryDocumentStore::new(),
        notifier.clone(),
        TokenService::new("test-secret"),
    ));

    let app = routes::create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, notifier)
}

/// Register an account and return its uid
pub async fn register(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    body["uid"].as_str().expect("No uid in response").to_string()
}

/// Register an account, set a nickname, and return its uid
pub async fn register_complete(
    server: &TestServer,
    email: &str,
    password: &str,
    nickname: &str,
) -> String {
    let uid = register(server, email, password).await;

    let response = server
        .post("/registernickname")
        .json(&json!({ "uid": uid, "nickname": nickname }))
        .await;
    assert_eq!(response.status_code(), 200);

    uid
}

/// Log in and return the bearer token from the Authorization header
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);

    response
        .header("authorization")
        .to_str()
        .expect("Authorization header is not a string")
        .strip_prefix("Bearer ")
        .expect("Authorization header is not a bearer token")
        .to_string()
}

/// Build an Authorization header value for a bearer token
pub fn bearer(token: &str) -> axum::http::HeaderValue {
    format!("Bearer {token}")
        .parse()
        .expect("Invalid header value")
}
