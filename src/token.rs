//! Session token issuance and validation

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Session token lifetime in seconds (30 days)
const TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — account id.
    pub sub: String,
    /// Email the account was registered with.
    pub email: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Mints and validates HS256 session tokens over a shared secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed session token for an account.
    pub fn mint(&self, account_id: &str, email: &str) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("token encode: {e}")))
    }

    /// Verify signature and expiry and return the claims.
    ///
    /// Revocation is checked separately, against the shared document store,
    /// by the auth middleware. The cause of a failure is never surfaced to
    /// the client.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::InvalidToken)
    }
}
