//! Auth Router
//!
//! Wires the handlers, shared state, and session middleware into a
//! single `Router`. The ephemeral stores (captcha challenges, attempt
//! counters) are created here from the configured TTLs, so they live
//! exactly as long as the router's state.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::application::attempts::LoginAttemptTracker;
use crate::application::captcha::CaptchaStore;
use crate::application::config::AuthConfig;
use crate::application::token::SessionTokenIssuer;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers;
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Shared state for the auth routes
pub struct AuthAppState<R, M> {
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub captcha: Arc<CaptchaStore>,
    pub attempts: Arc<LoginAttemptTracker>,
    pub tokens: Arc<SessionTokenIssuer>,
}

// Manual impl: `#[derive(Clone)]` would require R: Clone and M: Clone.
impl<R, M> Clone for AuthAppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
            captcha: self.captcha.clone(),
            attempts: self.attempts.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Build the auth router.
///
/// ```text
/// GET  /captcha              issue an arithmetic challenge
/// POST /login                authenticate, returns session token
/// POST /password/forgot      request a reset OTP by email
/// POST /password/verify-otp  exchange OTP for a reset token
/// POST /password/reset       set a new password
/// GET  /me                   identity behind the session token (protected)
/// ```
pub fn auth_router<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let tokens = Arc::new(SessionTokenIssuer::new(
        config.token_secret,
        config.token_ttl,
    ));

    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        captcha: Arc::new(CaptchaStore::new(config.captcha_ttl)),
        attempts: Arc::new(LoginAttemptTracker::new(config.attempt_ttl)),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(axum::middleware::from_fn_with_state(
            AuthMiddlewareState { tokens },
            require_auth,
        ));

    Router::new()
        .route("/captcha", get(handlers::get_captcha::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/password/forgot", post(handlers::forgot_password::<R, M>))
        .route("/password/verify-otp", post(handlers::verify_otp::<R, M>))
        .route("/password/reset", post(handlers::reset_password::<R, M>))
        .merge(protected)
        .with_state(state)
}
