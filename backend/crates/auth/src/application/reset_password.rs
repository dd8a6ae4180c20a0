//! Password Reset: Apply New Password
//!
//! Final step of the recovery flow. The new password must satisfy the
//! strength policy before any lookup happens; a valid reset token is
//! then exchanged for a rehash of the account password. The token is
//! cleared in the same update, so it works exactly once.
//!
//! Completing a reset does not clear any login throttling state: a
//! counter accumulated against the identifier keeps its captcha gate.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Password reset use case
pub struct ResetPasswordUseCase<R> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> ResetPasswordUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        email: &str,
        reset_token: &str,
        new_password: String,
    ) -> AuthResult<()> {
        // Policy first: a weak password is reported as such even when
        // the token would not have matched.
        let password = ClearTextPassword::new(new_password)?;

        let email = Email::new(email).map_err(|_| AuthError::InvalidResetToken)?;

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidResetToken);
        };
        if !user.can_login() {
            return Err(AuthError::InvalidResetToken);
        }

        let now = Utc::now();
        let Some(stored_hash) = user.pending_reset_token_hash(now) else {
            return Err(AuthError::InvalidResetToken);
        };

        let supplied_hash = crypto::sha256_hex(reset_token.trim().as_bytes());
        if !crypto::constant_time_eq(supplied_hash.as_bytes(), stored_hash.as_bytes()) {
            return Err(AuthError::InvalidResetToken);
        }

        let new_hash = password.hash(self.config.pepper())?;
        user.set_password_hash(new_hash);
        user.clear_reset_token();
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");
        Ok(())
    }
}
