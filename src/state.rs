//! Application state

use crate::email::Notifier;
use crate::store::{CredentialStore, DocumentStore};
use crate::token::TokenService;

/// Shared application state, generic over the external collaborators so that
/// tests can plug in in-memory stores and a capturing notifier.
pub struct AppState<C, D, N>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    pub credentials: C,
    pub documents: D,
    pub notifier: N,
    pub tokens: TokenService,
}

impl<C, D, N> AppState<C, D, N>
where
    C: CredentialStore,
    D: DocumentStore,
    N: Notifier,
{
    pub fn new(credentials: C, documents: D, notifier: N, tokens: TokenService) -> Self {
        Self {
            credentials,
            documents,
            notifier,
            tokens,
        }
    }
}
