//! One-time-code endpoints for password recovery

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::crypto::generate_otp;
use crate::email::Notifier;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{CredentialStore, DocumentStore, OtpDoc, OTPS};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /forgot-password
/// Issue a fresh code for the account, replacing any outstanding one, and
/// dispatch it by email. Success is reported only after dispatch completes.
pub async fn forgot_password<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let record = state
        .credentials
        .find_by_email(&req.email)?
        .ok_or(ApiError::NotFound)?;

    let code = generate_otp();

    // At most one active code per account: a new issuance overwrites.
    let doc = serde_json::to_value(&OtpDoc { code: code.clone() })
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    state.documents.put(OTPS, &record.account_id, doc)?;

    state
        .notifier
        .send_otp(&req.email, &code)
        .map_err(ApiError::Internal)?;

    tracing::info!(uid = %record.account_id, "One-time code issued");

    Ok(Json(json!({ "message": "OTP sent to your email" })))
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub uid: String,
    #[serde(rename = "enteredOtp")]
    pub entered_otp: String,
}

/// POST /verify-otp
/// Single-use check: the stored code is deleted on every attempt, right or
/// wrong, so a second guess always comes back not-found.
pub async fn verify_otp<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<Value>, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let doc = state
        .documents
        .get(OTPS, &req.uid)?
        .ok_or(ApiError::NotFound)?;
    let otp: OtpDoc = serde_json::from_value(doc)
        .map_err(|e| ApiError::Internal(format!("malformed OTP document: {e}")))?;

    state.documents.delete(OTPS, &req.uid)?;

    if otp.code != req.entered_otp {
        tracing::warn!(uid = %req.uid, "One-time code mismatch, code consumed");
        return Err(ApiError::IncorrectCode);
    }

    Ok(Json(json!({ "message": "OTP verified successfully" })))
}
