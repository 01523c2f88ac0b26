//! Mindbloom Backend
//!
//! Identity and session lifecycle service for the Mindbloom mobile app:
//! multi-step registration, login/logout, password change and password
//! recovery via one-time codes. Everything else the app stores (journals,
//! posts, question banks) is plain keyed-document CRUD and goes through the
//! generic [`store::DocumentStore`] trait.

pub mod config;
pub mod crypto;
pub mod email;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod token;

pub use config::Config;
pub use email::{ConsoleNotifier, Notifier, SmtpConfig, SmtpNotifier};
pub use error::ApiError;
pub use state::AppState;
pub use store::{
    CredentialStore, DocumentStore, InMemoryCredentialStore, InMemoryDocumentStore,
};
pub use token::{SessionClaims, TokenService};
