//! Service configuration

use crate::email::SmtpConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Shared secret used to sign session tokens
    pub token_secret: String,

    /// SMTP configuration for delivering one-time codes; when absent the
    /// console notifier is used instead
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// `PORT` (default 3000), `TOKEN_SECRET` (falls back to a
    /// development-only value) and the optional `SMTP_*` block.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let token_secret = std::env::var("TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("TOKEN_SECRET not set, using a development-only secret");
            "insecure-dev-secret".to_string()
        });

        Self {
            port,
            token_secret,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            token_secret: "insecure-dev-secret".to_string(),
            smtp: None,
        }
    }
}
