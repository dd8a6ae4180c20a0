//! Password Reset: Request OTP
//!
//! First step of the recovery flow. Generates a six-digit OTP, stores
//! its digest on the account, and emails the clear value. The response
//! is identical whether or not the address belongs to an account, and
//! mail delivery failures are swallowed after logging, so the endpoint
//! cannot be used to probe for registered addresses.

use std::sync::Arc;

use platform::crypto;
use rand::Rng;

use crate::application::config::AuthConfig;
use crate::domain::mailer::{MailMessage, Mailer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// OTP request use case
pub struct RequestOtpUseCase<R, M> {
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository, M: Mailer> RequestOtpUseCase<R, M> {
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    /// Issue an OTP for the account behind `email`, if one exists and is
    /// active. Always succeeds from the caller's point of view.
    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            return Ok(());
        };
        if !user.can_login() {
            return Ok(());
        }

        // 100000..=999999: six digits, never a leading zero, so the
        // emailed value round-trips through numeric input fields.
        let otp = rand::rng().random_range(100_000u32..=999_999).to_string();

        user.set_reset_otp(crypto::sha256_hex(otp.as_bytes()), self.config.otp_expiry());
        self.repo.update(&user).await?;

        let minutes = self.config.otp_ttl.as_secs() / 60;
        let message = MailMessage {
            to: user.email.as_str().to_string(),
            subject: "Your password reset code".to_string(),
            text: format!(
                "Your one-time password reset code is {otp}. \
                 It expires in {minutes} minutes. \
                 If you did not request a password reset, ignore this message."
            ),
            html: None,
        };

        // The OTP is already persisted; a delivery failure must not turn
        // into a different response for registered addresses.
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(error = %e, "Failed to deliver password reset mail");
        }

        Ok(())
    }
}
