//! Mindbloom Backend
//!
//! HTTP entry point: wires the in-memory collaborators, the notifier picked
//! from configuration and the token service into the router and serves it.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mindbloom_backend::{
    routes, AppState, Config, ConsoleNotifier, InMemoryCredentialStore, InMemoryDocumentStore,
    Notifier, SmtpNotifier, TokenService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindbloom_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(port = config.port, "Loaded configuration");

    // Pick the notifier
    let notifier: Box<dyn Notifier> = match &config.smtp {
        Some(smtp) => Box::new(SmtpNotifier::new(smtp.clone()).map_err(anyhow::Error::msg)?),
        None => {
            tracing::warn!("SMTP not configured, printing one-time codes to the console");
            Box::new(ConsoleNotifier::new())
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(
        InMemoryCredentialStore::new(),
        InMemoryDocumentStore::new(),
        notifier,
        TokenService::new(&config.token_secret),
    ));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
