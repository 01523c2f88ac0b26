//! HTTP routes for the backend

mod auth;
mod middleware;
mod otp;
mod register;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::email::Notifier;
use crate::state::AppState;
use crate::store::{CredentialStore, DocumentStore};

/// Create the router with all routes
pub fn create_router<C, D, N>(state: Arc<AppState<C, D, N>>) -> Router
where
    C: CredentialStore + 'static,
    D: DocumentStore + 'static,
    N: Notifier + 'static,
{
    // Change-password is the only endpoint requiring a valid, non-revoked
    // session token. Logout deliberately sits outside the middleware: it
    // revokes whatever bearer string it is handed.
    let protected = Router::new()
        .route("/change-password", post(auth::change_password))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth::<C, D, N>,
        ));

    Router::new()
        .route("/register", post(register::register))
        .route("/userdetails", post(register::user_details))
        .route("/registerphonenumber", post(register::register_phone_number))
        .route("/registernickname", post(register::register_nickname))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(otp::forgot_password))
        .route("/verify-otp", post(otp::verify_otp))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
