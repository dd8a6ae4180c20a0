//! Outbound Mail Port
//!
//! The OTP-request step is the only caller. Delivery failures are
//! reported as errors; the caller decides whether to surface them
//! (anti-enumeration requires swallowing them on the reset path).

use crate::error::AuthResult;

/// A single outbound message
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Mail delivery trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver a message or return an error
    async fn send(&self, message: &MailMessage) -> AuthResult<()>;
}
