//! One-time-code delivery abstractions

pub mod console;
pub mod smtp;

pub use console::ConsoleNotifier;
pub use smtp::{SmtpConfig, SmtpNotifier};

/// Trait for delivering one-time codes to an account's email address
pub trait Notifier: Send + Sync {
    /// Send a password-recovery code to an email address
    fn send_otp(&self, email: &str, code: &str) -> Result<(), String>;
}

/// Allow using Box<dyn Notifier> as a Notifier
impl Notifier for Box<dyn Notifier> {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        (**self).send_otp(email, code)
    }
}
