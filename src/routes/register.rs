//! Registration endpoints
//!
//! Registration is a client-driven sequence of independent steps: create the
//! account, then attach profile fields, phone number and nickname in any
//! order, repeated as often as the client likes. Nothing is transactional
//! across steps; an account stays registration-incomplete until a nickname
//! lands, and login prunes abandoned ones.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::crypto::hash_password;
use crate::email::Notifier;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{
    AccountDoc, CredentialStore, DocumentStore, ProfilePatch, ACCOUNTS, NICKNAMES,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct StepResponse {
    pub message: String,
    pub uid: String,
}

/// POST /register
/// First step: provider record plus its document-store mirror.
pub async fn register<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<StepResponse>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let password_hash =
        hash_password(&req.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    // The provider record stores the same digest as the mirror.
    let uid = state.credentials.create_account(&req.email, &password_hash)?;

    let doc = AccountDoc::new(req.email, password_hash);
    let doc = serde_json::to_value(&doc).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.documents.put(ACCOUNTS, &uid, doc)?;

    tracing::info!(uid = %uid, "Account created");

    Ok(Json(StepResponse {
        message: "User registered successfully".to_string(),
        uid,
    }))
}

#[derive(Deserialize)]
pub struct UserDetailsRequest {
    pub uid: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub occupation: Option<String>,
    pub relationshipstatus: Option<String>,
    pub language: Option<String>,
}

/// POST /userdetails
/// Attach profile fields. Merge semantics: unspecified fields stay as they
/// are, specified ones are overwritten.
pub async fn user_details<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<UserDetailsRequest>,
) -> Result<Json<StepResponse>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let patch = ProfilePatch {
        name: req.name,
        gender: req.gender,
        age: req.age,
        occupation: req.occupation,
        relationship_status: req.relationshipstatus,
        language: req.language,
        ..Default::default()
    };
    let patch = serde_json::to_value(&patch).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.documents.merge(ACCOUNTS, &req.uid, patch)?;

    Ok(Json(StepResponse {
        message: "User details saved".to_string(),
        uid: req.uid,
    }))
}

#[derive(Deserialize)]
pub struct RegisterPhoneNumberRequest {
    pub uid: String,
    pub phonenumber: String,
}

/// POST /registerphonenumber
pub async fn register_phone_number<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<RegisterPhoneNumberRequest>,
) -> Result<Json<StepResponse>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let patch = ProfilePatch {
        phone_number: Some(req.phonenumber),
        ..Default::default()
    };
    let patch = serde_json::to_value(&patch).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.documents.merge(ACCOUNTS, &req.uid, patch)?;

    Ok(Json(StepResponse {
        message: "Phone number saved".to_string(),
        uid: req.uid,
    }))
}

#[derive(Deserialize)]
pub struct RegisterNicknameRequest {
    pub uid: String,
    pub nickname: String,
}

/// POST /registernickname
/// Completes registration. Uniqueness is enforced by an atomic conditional
/// write on the nickname index, not by scanning accounts, so two racing
/// registrations cannot both claim the same nickname.
pub async fn register_nickname<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<RegisterNicknameRequest>,
) -> Result<Json<StepResponse>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let created =
        state
            .documents
            .create_if_absent(NICKNAMES, &req.nickname, json!({ "uid": req.uid }))?;

    if !created {
        // Re-submitting one's own nickname is an idempotent success.
        let owned_by_caller = state
            .documents
            .get(NICKNAMES, &req.nickname)?
            .as_ref()
            .and_then(|doc| doc.get("uid"))
            .and_then(|uid| uid.as_str())
            .map(|uid| uid == req.uid)
            .unwrap_or(false);
        if !owned_by_caller {
            return Err(ApiError::NicknameTaken);
        }
    }

    // Release a previously held nickname before recording the new one.
    let previous = state
        .documents
        .get(ACCOUNTS, &req.uid)?
        .and_then(|doc| serde_json::from_value::<AccountDoc>(doc).ok())
        .and_then(|account| account.nickname);
    if let Some(previous) = previous {
        if previous != req.nickname {
            state.documents.delete(NICKNAMES, &previous)?;
        }
    }

    state
        .documents
        .merge(ACCOUNTS, &req.uid, json!({ "nickname": req.nickname }))?;

    tracing::info!(uid = %req.uid, "Nickname registered");

    Ok(Json(StepResponse {
        message: "Nickname registered successfully".to_string(),
        uid: req.uid,
    }))
}
