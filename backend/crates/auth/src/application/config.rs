//! Auth Configuration
//!
//! Every tunable of the login and recovery flows lives here: secrets,
//! TTLs, and the captcha threshold. Handlers receive it through the
//! shared state, so a test can shrink a TTL or pin a secret without
//! touching any other code.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::RngCore;

/// Authentication and password-recovery settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for session tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Captcha challenge lifetime
    pub captcha_ttl: Duration,
    /// Sliding window for the login attempt counter
    pub attempt_ttl: Duration,
    /// Failed attempts at which a captcha becomes mandatory
    pub captcha_threshold: u32,
    /// Password-reset OTP lifetime
    pub otp_ttl: Duration,
    /// Password-reset token lifetime
    pub reset_token_ttl: Duration,
    /// Optional application-wide pepper mixed into password hashes
    pub password_pepper: Option<Vec<u8>>,
    /// From address for recovery mail
    pub mail_from: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 60 * 60),
            captcha_ttl: Duration::from_secs(10 * 60),
            attempt_ttl: Duration::from_secs(15 * 60),
            captcha_threshold: 3,
            otp_ttl: Duration::from_secs(10 * 60),
            reset_token_ttl: Duration::from_secs(15 * 60),
            password_pepper: None,
            mail_from: "no-reply@localhost".to_string(),
        }
    }
}

impl AuthConfig {
    /// Default settings with a freshly generated random token secret.
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Self::default()
        }
    }

    /// Settings for local development: random secret, otherwise defaults.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Pepper as a byte slice, if configured.
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Expiry timestamp for an OTP issued now.
    pub fn otp_expiry(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::seconds(self.otp_ttl.as_secs() as i64)
    }

    /// Expiry timestamp for a reset token issued now.
    pub fn reset_token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::seconds(self.reset_token_ttl.as_secs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = AuthConfig::default();
        assert_eq!(config.captcha_threshold, 3);
        assert_eq!(config.attempt_ttl, Duration::from_secs(900));
        assert_eq!(config.otp_ttl, Duration::from_secs(600));
        assert_eq!(config.reset_token_ttl, Duration::from_secs(900));
    }

    #[test]
    fn test_random_secret_is_random() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_expiry_is_in_the_future() {
        let config = AuthConfig::default();
        assert!(config.otp_expiry() > Utc::now());
        assert!(config.reset_token_expiry() > config.otp_expiry());
    }
}
