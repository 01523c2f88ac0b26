//! Storage abstractions
//!
//! Two external collaborators back the identity subsystem: a managed
//! identity provider holding login credentials ([`CredentialStore`]) and a
//! keyed-document database with partial-update semantics
//! ([`DocumentStore`]). Handlers only ever talk to these traits; the
//! in-memory implementations exist for development and tests.

pub mod memory;
pub mod models;

pub use memory::{InMemoryCredentialStore, InMemoryDocumentStore};
pub use models::*;

use serde_json::Value;

use crate::error::ApiError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ApiError>;

/// Account documents, keyed by account id
pub const ACCOUNTS: &str = "accounts";

/// Nickname ownership index, keyed by nickname
pub const NICKNAMES: &str = "nicknames";

/// One-time codes, keyed by account id
pub const OTPS: &str = "otps";

/// Revoked session tokens, keyed by the token string
pub const REVOKED_TOKENS: &str = "revoked_tokens";

/// Trait for the managed identity provider holding login credentials.
pub trait CredentialStore: Send + Sync {
    /// Create a provider record; returns the provider-assigned account id.
    fn create_account(&self, email: &str, password_hash: &str) -> StoreResult<String>;

    /// Look up a provider record by email.
    fn find_by_email(&self, email: &str) -> StoreResult<Option<CredentialRecord>>;

    /// Replace the stored password hash for an account.
    fn set_password(&self, account_id: &str, password_hash: &str) -> StoreResult<()>;
}

/// Trait for keyed-document persistence with merge semantics.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` if absent.
    fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Value>>;

    /// Write a document, replacing any existing content under `key`.
    fn put(&self, collection: &str, key: &str, doc: Value) -> StoreResult<()>;

    /// Merge fields into a document, creating it if absent. Fields not named
    /// in `patch` are left untouched.
    fn merge(&self, collection: &str, key: &str, patch: Value) -> StoreResult<()>;

    /// Delete a document. Deleting an absent document is not an error.
    fn delete(&self, collection: &str, key: &str) -> StoreResult<()>;

    /// Atomically create a document only if nothing exists under `key`.
    /// Returns `true` if the write happened.
    fn create_if_absent(&self, collection: &str, key: &str, doc: Value) -> StoreResult<bool>;
}
