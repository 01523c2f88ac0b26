//! SMTP-based notifier for production

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};

use super::Notifier;

/// Configuration for SMTP delivery
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host (e.g., "smtp.resend.com")
    pub host: String,
    /// SMTP server port (typically 465 for TLS, 587 for STARTTLS)
    pub port: u16,
    /// SMTP username
    pub username: String,
    /// SMTP password (or API key for services like Resend)
    pub password: String,
    /// From email address
    pub from_email: String,
    /// From name (optional)
    pub from_name: Option<String>,
}

impl SmtpConfig {
    /// Create config from environment variables
    ///
    /// Required:
    /// - SMTP_HOST
    /// - SMTP_USERNAME
    /// - SMTP_PASSWORD
    /// - SMTP_FROM_EMAIL
    ///
    /// Optional:
    /// - SMTP_PORT (default: 465)
    /// - SMTP_FROM_NAME
    pub fn from_env() -> Option<Self> {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        let host = get_env("SMTP_HOST")?;
        let username = get_env("SMTP_USERNAME")?;
        let password = get_env("SMTP_PASSWORD")?;
        let from_email = get_env("SMTP_FROM_EMAIL")?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(465);

        let from_name = std::env::var("SMTP_FROM_NAME").ok();

        Some(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
        })
    }
}

/// SMTP notifier for production use
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from_email: String,
    from_name: Option<String>,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier
    pub fn new(config: SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.username, config.password);

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .port(config.port)
            .credentials(creds)
            .build();

        // Test the connection
        transport
            .test_connection()
            .map_err(|e| format!("SMTP connection test failed: {}", e))?;

        tracing::info!(host = %config.host, port = config.port, "SMTP connection established");

        Ok(Self {
            transport,
            from_email: config.from_email,
            from_name: config.from_name,
        })
    }

    fn from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }

    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let from = self
            .from_address()
            .parse()
            .map_err(|e| format!("Invalid from address: {}", e))?;

        let to_addr = to
            .parse()
            .map_err(|e| format!("Invalid to address: {}", e))?;

        let email = Message::builder()
            .from(from)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to build email: {}", e))?;

        self.transport
            .send(&email)
            .map_err(|e| format!("Failed to send email: {}", e))?;

        Ok(())
    }
}

impl Notifier for SmtpNotifier {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        let subject = "Your Mindbloom verification code";
        let body = format!(
            "Your one-time code is: {}\n\n\
             Enter this code in the app to reset your password.\n\n\
             If you didn't request this, you can safely ignore this email.",
            code
        );

        self.send_email(email, subject, &body)?;
        tracing::info!(email = %email, "One-time code email sent");
        Ok(())
    }
}
