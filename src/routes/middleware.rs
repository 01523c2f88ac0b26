//! Bearer-token authentication middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::email::Notifier;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{CredentialStore, DocumentStore, REVOKED_TOKENS};

/// Strip the `Bearer ` prefix from an Authorization header value.
pub fn bearer_token(header: Option<&HeaderValue>) -> Option<String> {
    header
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Require a valid, non-revoked session token.
///
/// On success the verified claims are attached to the request extensions
/// for the handler. The client is never told which check failed.
pub async fn require_auth<C, D, N>(
    State(state): State<Arc<AppState<C, D, N>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    let token =
        bearer_token(request.headers().get(AUTHORIZATION)).ok_or(ApiError::MissingToken)?;

    let claims = state.tokens.decode(&token)?;

    // A structurally valid token that has been logged out must never be
    // accepted again.
    if state.documents.get(REVOKED_TOKENS, &token)?.is_some() {
        return Err(ApiError::InvalidToken);
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
