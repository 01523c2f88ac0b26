//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration incomplete")]
    IncompleteRegistration,

    #[error("Nickname already taken")]
    NicknameTaken,

    #[error("Incorrect OTP")]
    IncorrectCode,

    #[error("Token already revoked")]
    AlreadyRevoked,

    #[error("Current password is incorrect")]
    PasswordMismatch,

    #[error("Unauthorized - Missing token")]
    MissingToken,

    #[error("Unauthorized - Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            ApiError::IncompleteRegistration => (
                StatusCode::UNAUTHORIZED,
                "Registration incomplete - please register again",
            ),
            ApiError::NicknameTaken => (StatusCode::BAD_REQUEST, "Nickname already taken"),
            ApiError::IncorrectCode => (StatusCode::BAD_REQUEST, "Incorrect OTP"),
            ApiError::AlreadyRevoked => (StatusCode::UNAUTHORIZED, "Token already revoked"),
            ApiError::PasswordMismatch => {
                (StatusCode::BAD_REQUEST, "Current password is incorrect")
            }
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthorized - Missing token"),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Unauthorized - Invalid token"),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}
