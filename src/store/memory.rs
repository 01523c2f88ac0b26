//! In-memory storage implementations

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::{CredentialRecord, CredentialStore, DocumentStore, StoreResult};
use crate::error::ApiError;

/// In-memory stand-in for the managed identity provider.
///
/// Matches the provider contract the handlers rely on: opaque assigned
/// account ids and rejection of duplicate emails.
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn create_account(&self, email: &str, password_hash: &str) -> StoreResult<String> {
        let mut records = self.records.write().unwrap();
        if records.values().any(|r| r.email == email) {
            return Err(ApiError::Internal(format!(
                "email already registered: {email}"
            )));
        }

        let account_id = Uuid::new_v4().to_string();
        records.insert(
            account_id.clone(),
            CredentialRecord {
                account_id: account_id.clone(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(account_id)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<CredentialRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .values()
            .find(|r| r.email == email)
            .cloned())
    }

    fn set_password(&self, account_id: &str, password_hash: &str) -> StoreResult<()> {
        let mut records = self.records.write().unwrap();
        match records.get_mut(account_id) {
            Some(record) => {
                record.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(ApiError::Internal(format!(
                "no such account: {account_id}"
            ))),
        }
    }
}

/// In-memory keyed-document store with merge semantics.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .and_then(|col| col.get(key))
            .cloned())
    }

    fn put(&self, collection: &str, key: &str, doc: Value) -> StoreResult<()> {
        self.collections
            .write()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), doc);
        Ok(())
    }

    fn merge(&self, collection: &str, key: &str, patch: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().unwrap();
        let col = collections.entry(collection.to_string()).or_default();

        let merged = match (col.remove(key), patch) {
            (Some(Value::Object(mut existing)), Value::Object(fields)) => {
                existing.extend(fields);
                Value::Object(existing)
            }
            // Absent document or non-object content: the patch wins whole.
            (_, patch) => patch,
        };
        col.insert(key.to_string(), merged);
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> StoreResult<()> {
        if let Some(col) = self.collections.write().unwrap().get_mut(collection) {
            col.remove(key);
        }
        Ok(())
    }

    fn create_if_absent(&self, collection: &str, key: &str, doc: Value) -> StoreResult<bool> {
        // The write lock makes the check-then-insert atomic.
        let mut collections = self.collections.write().unwrap();
        let col = collections.entry(collection.to_string()).or_default();
        if col.contains_key(key) {
            return Ok(false);
        }
        col.insert(key.to_string(), doc);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_leaves_other_fields_untouched() {
        let store = InMemoryDocumentStore::new();

        store
            .put("accounts", "u1", json!({ "email": "a@x.com", "name": "Ada" }))
            .unwrap();
        store
            .merge("accounts", "u1", json!({ "nickname": "ada" }))
            .unwrap();

        let doc = store.get("accounts", "u1").unwrap().unwrap();
        assert_eq!(doc["email"], "a@x.com");
        assert_eq!(doc["name"], "Ada");
        assert_eq!(doc["nickname"], "ada");
    }

    #[test]
    fn test_merge_creates_absent_document() {
        let store = InMemoryDocumentStore::new();

        store
            .merge("accounts", "u1", json!({ "nickname": "ada" }))
            .unwrap();

        let doc = store.get("accounts", "u1").unwrap().unwrap();
        assert_eq!(doc["nickname"], "ada");
    }

    #[test]
    fn test_create_if_absent_is_single_shot() {
        let store = InMemoryDocumentStore::new();

        assert!(store
            .create_if_absent("nicknames", "ada", json!({ "uid": "u1" }))
            .unwrap());
        assert!(!store
            .create_if_absent("nicknames", "ada", json!({ "uid": "u2" }))
            .unwrap());

        // Loser's write must not have happened
        let doc = store.get("nicknames", "ada").unwrap().unwrap();
        assert_eq!(doc["uid"], "u1");
    }

    #[test]
    fn test_delete_absent_is_ok() {
        let store = InMemoryDocumentStore::new();
        store.delete("accounts", "missing").unwrap();
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = InMemoryCredentialStore::new();

        store.create_account("a@x.com", "hash1").unwrap();
        assert!(store.create_account("a@x.com", "hash2").is_err());
    }

    #[test]
    fn test_set_password_unknown_account() {
        let store = InMemoryCredentialStore::new();
        assert!(store.set_password("missing", "hash").is_err());
    }

    #[test]
    fn test_find_by_email() {
        let store = InMemoryCredentialStore::new();

        let uid = store.create_account("a@x.com", "hash").unwrap();
        let record = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(record.account_id, uid);
        assert!(store.find_by_email("b@x.com").unwrap().is_none());
    }
}
