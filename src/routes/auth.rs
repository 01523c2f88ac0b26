//! Login, logout and password-change endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::crypto::{hash_password, verify_password};
use crate::email::Notifier;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{AccountDoc, CredentialStore, DocumentStore, ACCOUNTS, REVOKED_TOKENS};
use crate::token::SessionClaims;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /login
pub async fn login<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let record = state
        .credentials
        .find_by_email(&req.email)?
        .ok_or(ApiError::NotFound)?;

    let doc = state
        .documents
        .get(ACCOUNTS, &record.account_id)?
        .ok_or(ApiError::NotFound)?;
    let account: AccountDoc = serde_json::from_value(doc)
        .map_err(|e| ApiError::Internal(format!("malformed account document: {e}")))?;

    // An account that never finished registration is pruned here so the
    // client can start over.
    let Some(nickname) = account.nickname else {
        state.documents.delete(ACCOUNTS, &record.account_id)?;
        tracing::warn!(uid = %record.account_id, "Deleted incomplete registration");
        return Err(ApiError::IncompleteRegistration);
    };

    let valid = verify_password(&req.password, &account.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.mint(&record.account_id, &account.email)?;

    tracing::info!(uid = %record.account_id, "Login successful");

    let headers = [(AUTHORIZATION, format!("Bearer {token}"))];
    let body = Json(json!({
        "message": "Login successful",
        "userData": {
            "email": account.email,
            "uid": record.account_id,
            "nickname": nickname,
        }
    }));

    Ok((headers, body))
}

/// POST /logout
///
/// Adds the presented bearer string to the shared revocation collection.
/// No signature check happens here: any string is accepted, and revoking
/// the same string twice is an error.
pub async fn logout<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let token = super::middleware::bearer_token(headers.get(AUTHORIZATION))
        .ok_or(ApiError::MissingToken)?;

    let revoked = state.documents.create_if_absent(
        REVOKED_TOKENS,
        &token,
        json!({ "revoked_at": Utc::now().timestamp() }),
    )?;
    if !revoked {
        return Err(ApiError::AlreadyRevoked);
    }

    tracing::info!("Session token revoked");

    Ok(Json(json!({ "message": "Logout successful" })))
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub uid: String,
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// POST /change-password (requires a valid, non-revoked session token)
///
/// The provider record is updated before the mirror: if the provider
/// rejects the new digest, both stores still hold the old one.
pub async fn change_password<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let doc = state
        .documents
        .get(ACCOUNTS, &req.uid)?
        .ok_or(ApiError::NotFound)?;
    let account: AccountDoc = serde_json::from_value(doc)
        .map_err(|e| ApiError::Internal(format!("malformed account document: {e}")))?;

    let valid = verify_password(&req.current_password, &account.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::PasswordMismatch);
    }

    let new_hash =
        hash_password(&req.new_password).map_err(|e| ApiError::Internal(e.to_string()))?;

    state.credentials.set_password(&req.uid, &new_hash)?;
    state
        .documents
        .merge(ACCOUNTS, &req.uid, json!({ "password_hash": new_hash }))?;

    tracing::info!(uid = %req.uid, by = %claims.sub, "Password changed");

    Ok(Json(json!({ "message": "Password changed successfully" })))
}
