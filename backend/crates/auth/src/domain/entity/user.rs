//! User Entity
//!
//! Admin account with credentials and password-recovery secrets.
//!
//! At most one recovery secret is pending at a time: setting an OTP
//! clears any reset token, and setting a reset token clears the OTP.
//! Both secrets are stored only as SHA-256 digests. Expiry is checked
//! on use, never swept.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};

/// Admin account entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login)
    pub username: UserName,
    /// Email address (unique, lowercase)
    pub email: Email,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// Administrative role
    pub role: UserRole,
    /// Inactive accounts cannot log in or recover passwords
    pub is_active: bool,
    /// Digest of the pending password-reset OTP
    pub reset_otp_hash: Option<String>,
    /// Expiry of the pending OTP
    pub reset_otp_expires_at: Option<DateTime<Utc>>,
    /// Digest of the pending reset token
    pub reset_token_hash: Option<String>,
    /// Expiry of the pending reset token
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active account with the default role
    pub fn new(username: UserName, email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            password_hash,
            role: UserRole::default(),
            is_active: true,
            reset_otp_hash: None,
            reset_otp_expires_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account can log in
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Store a new OTP digest, clearing any pending reset token.
    pub fn set_reset_otp(&mut self, otp_hash: String, expires_at: DateTime<Utc>) {
        self.reset_otp_hash = Some(otp_hash);
        self.reset_otp_expires_at = Some(expires_at);
        self.reset_token_hash = None;
        self.reset_token_expires_at = None;
        self.touch();
    }

    /// Digest of the pending OTP, if one exists and has not expired.
    pub fn pending_otp_hash(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.reset_otp_hash, self.reset_otp_expires_at) {
            (Some(hash), Some(expires_at)) if expires_at > now => Some(hash),
            _ => None,
        }
    }

    /// Store a new reset-token digest, consuming the OTP (single use).
    pub fn set_reset_token(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_token_expires_at = Some(expires_at);
        self.reset_otp_hash = None;
        self.reset_otp_expires_at = None;
        self.touch();
    }

    /// Digest of the pending reset token, if one exists and has not expired.
    pub fn pending_reset_token_hash(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.reset_token_hash, self.reset_token_expires_at) {
            (Some(hash), Some(expires_at)) if expires_at > now => Some(hash),
            _ => None,
        }
    }

    /// Clear the pending reset token (single use).
    pub fn clear_reset_token(&mut self) {
        self.reset_token_hash = None;
        self.reset_token_expires_at = None;
        self.touch();
    }

    /// Replace the password hash
    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use platform::password::ClearTextPassword;

    fn test_user() -> User {
        let hash = ClearTextPassword::new_unchecked("Valid1Pass!".to_string())
            .hash(None)
            .unwrap();
        User::new(
            UserName::new("jane").unwrap(),
            Email::new("jane@example.com").unwrap(),
            hash,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();
        assert!(user.is_active);
        assert!(user.can_login());
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.reset_otp_hash.is_none());
        assert!(user.reset_token_hash.is_none());
    }

    #[test]
    fn test_otp_clears_reset_token() {
        let mut user = test_user();
        let now = Utc::now();

        user.set_reset_token("token-digest".into(), now + Duration::minutes(15));
        user.set_reset_otp("otp-digest".into(), now + Duration::minutes(10));

        assert_eq!(user.pending_otp_hash(now), Some("otp-digest"));
        assert_eq!(user.pending_reset_token_hash(now), None);
    }

    #[test]
    fn test_reset_token_consumes_otp() {
        let mut user = test_user();
        let now = Utc::now();

        user.set_reset_otp("otp-digest".into(), now + Duration::minutes(10));
        user.set_reset_token("token-digest".into(), now + Duration::minutes(15));

        assert_eq!(user.pending_otp_hash(now), None);
        assert_eq!(user.pending_reset_token_hash(now), Some("token-digest"));
    }

    #[test]
    fn test_expired_secrets_are_absent() {
        let mut user = test_user();
        let now = Utc::now();

        user.set_reset_otp("otp-digest".into(), now - Duration::minutes(1));
        assert_eq!(user.pending_otp_hash(now), None);

        user.set_reset_token("token-digest".into(), now - Duration::minutes(1));
        assert_eq!(user.pending_reset_token_hash(now), None);
    }
}
