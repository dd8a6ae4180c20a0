//! Arithmetic Captcha
//!
//! Challenges are a single-digit addition ("3 + 7 = ?"). The store maps
//! an opaque token to the expected answer; a correct verification
//! consumes the challenge, a wrong one leaves it in place so the user
//! can retry the same question until it expires.

use std::time::Duration;

use platform::crypto;
use platform::ttl::TtlStore;
use rand::Rng;

/// A captcha challenge handed to the client
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Opaque token identifying the challenge
    pub token: String,
    /// Human-readable question
    pub question: String,
}

/// In-memory captcha challenge store
pub struct CaptchaStore {
    store: TtlStore<String>,
}

impl CaptchaStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: TtlStore::new(ttl),
        }
    }

    /// Generate a fresh challenge and record its expected answer.
    pub fn create_challenge(&self) -> Challenge {
        let mut rng = rand::rng();
        let a: u32 = rng.random_range(1..=9);
        let b: u32 = rng.random_range(1..=9);

        let token = crypto::new_token();
        self.store.set(&token, (a + b).to_string());

        Challenge {
            token,
            question: format!("{a} + {b} = ?"),
        }
    }

    /// Verify an answer against the stored challenge.
    ///
    /// Consumes the challenge only on success. Absent, expired, or
    /// wrongly answered challenges all return `false`.
    pub fn verify(&self, token: &str, answer: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.store.remove_if(token, |expected| answer.trim() == expected)
    }
}
