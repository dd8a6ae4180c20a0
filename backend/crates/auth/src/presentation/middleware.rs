//! Session Token Middleware
//!
//! Bearer-token authentication for protected routes. A verified token
//! becomes a [`CurrentUser`] extension; every failure is the same
//! `Unauthorized` response.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token::SessionTokenIssuer;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, inserted as a request extension
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Account UUID as a string
    pub id: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Require one of the listed roles.
    pub fn require_role(&self, allowed: &[UserRole]) -> AuthResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// State for the auth middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<SessionTokenIssuer>,
}

/// Middleware for `axum::middleware::from_fn_with_state`: verifies the
/// `Authorization: Bearer <token>` header and attaches [`CurrentUser`].
pub async fn require_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req).ok_or(AuthError::Unauthorized)?;
    let claims = state.tokens.verify(token)?;

    let role = UserRole::from_code(&claims.role).ok_or(AuthError::Unauthorized)?;
    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_role() {
        let user = CurrentUser {
            id: "id".to_string(),
            role: UserRole::Security,
        };
        assert!(user.require_role(&[UserRole::Security]).is_ok());
        assert!(
            user.require_role(&[UserRole::SuperAdmin, UserRole::Admin])
                .is_err()
        );
    }
}
