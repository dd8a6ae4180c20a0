//! Login Use Case
//!
//! Single-identifier login: an identifier containing `@` is treated as
//! an email address, anything else as a user name. Failures are
//! throttled per identifier-and-source pair, and once the counter
//! reaches the configured threshold a captcha must accompany every
//! further attempt.
//!
//! Unknown account, inactive account, and wrong password all produce
//! the same response, and an Argon2 verification runs even when no
//! account was found so the timing does not separate the cases.

use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

use platform::password::{ClearTextPassword, HashedPassword};
use serde::Serialize;

use crate::application::attempts::LoginAttemptTracker;
use crate::application::captcha::CaptchaStore;
use crate::application::config::AuthConfig;
use crate::application::token::SessionTokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Login request data
#[derive(Debug)]
pub struct LoginInput {
    /// Email address or user name
    pub identifier: String,
    pub password: String,
    pub captcha_token: Option<String>,
    pub captcha_answer: Option<String>,
    pub source_ip: Option<IpAddr>,
}

/// Public view of an account, safe to return to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for PublicProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
        }
    }
}

/// Successful login result
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: PublicProfile,
}

/// Login use case
pub struct LoginUseCase<R> {
    repo: Arc<R>,
    captcha: Arc<CaptchaStore>,
    attempts: Arc<LoginAttemptTracker>,
    tokens: Arc<SessionTokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub fn new(
        repo: Arc<R>,
        captcha: Arc<CaptchaStore>,
        attempts: Arc<LoginAttemptTracker>,
        tokens: Arc<SessionTokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            captcha,
            attempts,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let identifier = input.identifier.trim();
        if identifier.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Identifier and password are required".to_string(),
            ));
        }

        let source = input
            .source_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let key = LoginAttemptTracker::key(identifier, &source);

        // Captcha gate: once the counter reaches the threshold, every
        // attempt must carry a valid challenge answer.
        let attempts = self.attempts.attempts(&key);
        if attempts >= self.config.captcha_threshold {
            let passed = match (&input.captcha_token, &input.captcha_answer) {
                (Some(token), Some(answer)) => self.captcha.verify(token, answer),
                _ => false,
            };
            if !passed {
                let attempts = self.attempts.record_failure(&key);
                return Err(AuthError::CaptchaRequired { attempts });
            }
        }

        let user = self.find_account(identifier).await?;

        let password = ClearTextPassword::new_unchecked(input.password);
        let password_ok = match &user {
            Some(u) => u.password_hash.verify(&password, self.config.pepper()),
            None => {
                // Burn the same hashing cost for unknown accounts.
                dummy_hash().verify(&password, self.config.pepper());
                false
            }
        };

        match user {
            Some(user) if user.can_login() && password_ok => {
                self.attempts.reset(&key);
                let token = self.tokens.issue(&user.user_id, user.role)?;
                Ok(LoginOutput {
                    token,
                    user: PublicProfile::from(&user),
                })
            }
            _ => {
                let attempts = self.attempts.record_failure(&key);
                Err(AuthError::InvalidCredentials {
                    captcha_required: attempts >= self.config.captcha_threshold,
                    attempts,
                })
            }
        }
    }

    /// Route the identifier to the matching lookup. A malformed
    /// identifier behaves exactly like an unknown account.
    async fn find_account(&self, identifier: &str) -> AuthResult<Option<User>> {
        if identifier.contains('@') {
            match Email::new(identifier) {
                Ok(email) => self.repo.find_by_email(&email).await,
                Err(_) => Ok(None),
            }
        } else {
            match UserName::new(identifier) {
                Ok(username) => self.repo.find_by_username(&username).await,
                Err(_) => Ok(None),
            }
        }
    }
}

/// Placeholder hash verified when no account matches, so the response
/// time for unknown identifiers matches the known-account path.
fn dummy_hash() -> &'static HashedPassword {
    static DUMMY: OnceLock<HashedPassword> = OnceLock::new();
    DUMMY.get_or_init(|| {
        ClearTextPassword::new_unchecked("placeholder-not-a-real-password".to_string())
            .hash(None)
            .expect("hashing a fixed placeholder cannot fail")
    })
}
