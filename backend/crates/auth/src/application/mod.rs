//! Application Layer
//!
//! Use cases for login and password recovery, plus the process-local
//! stores they depend on. Each use case holds its dependencies as Arcs
//! and exposes a single `execute`.

pub mod attempts;
pub mod captcha;
pub mod config;
pub mod login;
pub mod request_otp;
pub mod reset_password;
pub mod token;
pub mod verify_otp;

pub use attempts::LoginAttemptTracker;
pub use captcha::{CaptchaStore, Challenge};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase, PublicProfile};
pub use request_otp::RequestOtpUseCase;
pub use reset_password::ResetPasswordUseCase;
pub use token::{SessionClaims, SessionTokenIssuer};
pub use verify_otp::{VerifyOtpOutput, VerifyOtpUseCase};
