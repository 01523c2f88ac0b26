//! Console-based notifier for development

use super::Notifier;

/// Notifier that prints codes to the console (for development)
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), String> {
        println!();
        println!("========================================");
        println!("  ONE-TIME CODE FOR: {}", email);
        println!("  CODE: {}", code);
        println!("========================================");
        println!();

        tracing::info!(email = %email, "One-time code dispatched");

        Ok(())
    }
}
