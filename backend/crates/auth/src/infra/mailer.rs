//! Log-Only Mailer
//!
//! Writes outbound mail to the log instead of delivering it. Used in
//! development and in deployments where recovery mail goes through an
//! external relay that is not yet wired up.

use crate::domain::mailer::{Mailer, MailMessage};
use crate::error::AuthResult;

/// Mailer that logs instead of sending
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AuthResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "Outbound mail (log-only delivery)"
        );
        Ok(())
    }
}
