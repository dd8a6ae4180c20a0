//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, SHA-256, Base64)
//! - Password hashing (Argon2id) and the password strength policy
//! - Ephemeral TTL key-value store with lazy expiry
//! - Client source-address extraction

pub mod client;
pub mod crypto;
pub mod password;
pub mod ttl;
