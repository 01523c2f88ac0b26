//! Data models for the identity subsystem

use serde::{Deserialize, Serialize};

/// A record held by the identity provider.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Opaque, provider-assigned, immutable id
    pub account_id: String,
    pub email: String,
    pub password_hash: String,
}

/// The account document mirrored in the document store.
///
/// An account without a `nickname` is registration-incomplete and gets
/// deleted on its next login attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDoc {
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl AccountDoc {
    /// The initial mirror written at registration: identity only, every
    /// profile field still unset.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            nickname: None,
            name: None,
            gender: None,
            age: None,
            occupation: None,
            relationship_status: None,
            language: None,
            phone_number: None,
        }
    }
}

/// Profile fields settable independently during registration. Serializes
/// only the fields that are present, so merging never clears anything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A stored one-time code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpDoc {
    pub code: String,
}
