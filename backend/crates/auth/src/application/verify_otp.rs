//! Password Reset: Verify OTP
//!
//! Second step of the recovery flow. Exchanges a valid OTP for a
//! short-lived reset token. Storing the token's digest clears the OTP,
//! so each code works exactly once. All failure causes look the same to
//! the caller.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Result of a successful OTP verification
#[derive(Debug)]
pub struct VerifyOtpOutput {
    /// Clear reset token, returned exactly once
    pub reset_token: String,
}

/// OTP verification use case
pub struct VerifyOtpUseCase<R> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> VerifyOtpUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, email: &str, otp: &str) -> AuthResult<VerifyOtpOutput> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidOtp)?;

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("OTP verification for unknown address");
            return Err(AuthError::InvalidOtp);
        };
        if !user.can_login() {
            tracing::debug!("OTP verification for inactive account");
            return Err(AuthError::InvalidOtp);
        }

        let now = Utc::now();
        let Some(stored_hash) = user.pending_otp_hash(now) else {
            tracing::debug!("OTP verification without a pending code");
            return Err(AuthError::InvalidOtp);
        };

        let supplied_hash = crypto::sha256_hex(otp.trim().as_bytes());
        if !crypto::constant_time_eq(supplied_hash.as_bytes(), stored_hash.as_bytes()) {
            tracing::debug!("OTP digest mismatch");
            return Err(AuthError::InvalidOtp);
        }

        // 256-bit token; only its digest is persisted, consuming the OTP.
        let reset_token = crypto::to_hex(&crypto::random_bytes(32));
        user.set_reset_token(
            crypto::sha256_hex(reset_token.as_bytes()),
            self.config.reset_token_expiry(),
        );
        self.repo.update(&user).await?;

        Ok(VerifyOtpOutput { reset_token })
    }
}
