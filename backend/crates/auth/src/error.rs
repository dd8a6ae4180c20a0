//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Every authentication failure is reported with a generic message so
//! the response never reveals whether an account exists, is inactive,
//! or simply got the secret wrong. Login failures additionally carry
//! the attempt count and whether a captcha is now required, because the
//! client has to render the challenge proactively.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Captcha required and not (correctly) supplied
    #[error("Captcha required")]
    CaptchaRequired { attempts: u32 },

    /// Bad credentials, unknown account, or inactive account
    #[error("Invalid credentials")]
    InvalidCredentials { captcha_required: bool, attempts: u32 },

    /// Bad, expired, or missing OTP
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Bad, expired, or missing reset token
    #[error("Invalid reset request")]
    InvalidResetToken,

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but the role does not allow this
    #[error("Forbidden")]
    Forbidden,

    /// Malformed request input
    #[error("{0}")]
    Validation(String),

    /// Password strength policy violation
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Mail delivery failed
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::CaptchaRequired { .. } => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            AuthError::InvalidOtp | AuthError::InvalidResetToken => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) => StatusCode::BAD_REQUEST,
            AuthError::MailDelivery(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::CaptchaRequired { .. } => ErrorKind::BadRequest,
            AuthError::InvalidCredentials { .. } | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::InvalidOtp | AuthError::InvalidResetToken => ErrorKind::BadRequest,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::MailDelivery(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Mail delivery error");
            }
            AuthError::InvalidCredentials { attempts, .. } => {
                tracing::warn!(attempts, "Invalid login attempt");
            }
            AuthError::CaptchaRequired { attempts } => {
                tracing::warn!(attempts, "Login attempt without valid captcha");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        // Login failures carry throttling state so the client can render
        // a captcha on the next attempt; everything else is the standard
        // problem-details body.
        match &self {
            AuthError::CaptchaRequired { attempts } => (
                self.status_code(),
                Json(serde_json::json!({
                    "message": self.to_string(),
                    "captchaRequired": true,
                    "attempts": attempts,
                })),
            )
                .into_response(),
            AuthError::InvalidCredentials {
                captcha_required,
                attempts,
            } => (
                self.status_code(),
                Json(serde_json::json!({
                    "message": self.to_string(),
                    "captchaRequired": captcha_required,
                    "attempts": attempts,
                })),
            )
                .into_response(),
            _ => self.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::PasswordPolicy(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::CaptchaRequired { attempts: 4 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials {
                captcha_required: false,
                attempts: 1
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InvalidOtp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidResetToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_generic_messages_do_not_distinguish() {
        // All OTP failure causes collapse into one message.
        assert_eq!(AuthError::InvalidOtp.to_string(), "Invalid OTP");
        assert_eq!(
            AuthError::InvalidCredentials {
                captcha_required: false,
                attempts: 1
            }
            .to_string(),
            "Invalid credentials"
        );
    }
}
