//! Session Tokens
//!
//! Compact signed tokens: `base64url(claims-json) . base64url(hmac)`.
//! The HMAC-SHA256 signature covers the encoded claims, the signature
//! check runs in constant time, and every verification failure collapses
//! into the same `Unauthorized` error so a caller learns nothing about
//! which check tripped.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account UUID
    pub sub: String,
    /// Role code at issuance time
    pub role: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and verifies HMAC-signed session tokens
pub struct SessionTokenIssuer {
    secret: [u8; 32],
    ttl: Duration,
}

impl SessionTokenIssuer {
    pub fn new(secret: [u8; 32], ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a token for the account.
    pub fn issue(&self, user_id: &UserId, role: UserRole) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            role: role.code().to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("claims serialization failed: {e}")))?;
        let encoded = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{encoded}.{signature}"))
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed encoding, a bad signature, expiry, and an empty subject
    /// all yield the same error.
    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        let (encoded, signature) = token
            .split_once('.')
            .ok_or(AuthError::Unauthorized)?;

        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Unauthorized)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| AuthError::Unauthorized)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| AuthError::Unauthorized)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::Unauthorized)?;

        if claims.sub.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Unauthorized);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    fn issuer() -> SessionTokenIssuer {
        SessionTokenIssuer::new(SECRET, Duration::from_secs(3600))
    }

    fn sign(claims: &SessionClaims, secret: &[u8; 32]) -> String {
        let payload = serde_json::to_vec(claims).unwrap();
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{encoded}.{signature}")
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let issuer = issuer();
        let user_id = UserId::new();

        let token = issuer.issue(&user_id, UserRole::Security).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "SECURITY");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&UserId::new(), UserRole::Admin).unwrap();

        let mut tampered = token.clone();
        // Flip a character in the payload part.
        let flipped = if tampered.starts_with('A') { "B" } else { "A" };
        tampered.replace_range(0..1, flipped);

        assert!(matches!(
            issuer.verify(&tampered),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer().issue(&UserId::new(), UserRole::Admin).unwrap();
        let other = SessionTokenIssuer::new([8u8; 32], Duration::from_secs(3600));
        assert!(matches!(other.verify(&token), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = SessionTokenIssuer::new(SECRET, Duration::from_secs(0));
        let token = issuer.issue(&UserId::new(), UserRole::Admin).unwrap();
        assert!(matches!(
            issuer.verify(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: String::new(),
            role: "ADMIN".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = sign(&claims, &SECRET);
        assert!(matches!(
            issuer().verify(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = issuer();
        assert!(issuer.verify("").is_err());
        assert!(issuer.verify("no-dot-here").is_err());
        assert!(issuer.verify("a.b.c").is_err());
        assert!(issuer.verify("%%%.$$$").is_err());
    }
}
