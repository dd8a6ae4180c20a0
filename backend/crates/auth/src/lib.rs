//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and mail implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Admin login with username or email + password
//! - Escalating arithmetic CAPTCHA after repeated failures
//! - OTP-based password recovery (email, three steps)
//! - Stateless HMAC-signed session tokens carrying id + role
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; reset secrets stored as SHA-256 digests
//! - Failed logins tracked per (identifier, source address) with a 15-minute window
//! - Responses never distinguish unknown, inactive, and wrong-password accounts
//! - All captcha/OTP/reset-token secrets are single-use with independent expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
