//! HTTP Handlers
//!
//! Thin adapters between the wire DTOs and the use cases. Structural
//! validation (shape of the OTP, presence of fields) happens here; the
//! use cases own the semantics.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Extension, State};
use axum::http::HeaderMap;

use platform::client::extract_client_ip;

use crate::application::login::LoginInput;
use crate::application::{LoginUseCase, RequestOtpUseCase, ResetPasswordUseCase, VerifyOtpUseCase};
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AckResponse, CaptchaResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MeResponse,
    ResetPasswordRequest, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::presentation::middleware::CurrentUser;
use crate::presentation::router::AuthAppState;

/// GET /captcha - issue a fresh arithmetic challenge
pub async fn get_captcha<R, M>(State(state): State<AuthAppState<R, M>>) -> Json<CaptchaResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let challenge = state.captcha.create_challenge();
    Json(CaptchaResponse {
        captcha_token: challenge.token,
        question: challenge.question,
    })
}

/// POST /login - authenticate with identifier + password
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let source_ip = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.captcha.clone(),
        state.attempts.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
            captcha_token: body.captcha_token,
            captcha_answer: body.captcha_answer,
            source_ip,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: output.user,
    }))
}

/// POST /password/forgot - request a reset OTP by email
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(body): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<AckResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case =
        RequestOtpUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    use_case.execute(&body.email).await?;

    Ok(Json(AckResponse {
        message: "If the email exists, an OTP was sent.".to_string(),
    }))
}

/// POST /password/verify-otp - exchange an OTP for a reset token
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(body): Json<VerifyOtpRequest>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let otp = body.otp.trim();
    if otp.len() != 6 || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(AuthError::InvalidOtp);
    }

    let use_case = VerifyOtpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&body.email, otp).await?;

    Ok(Json(VerifyOtpResponse {
        reset_token: output.reset_token,
    }))
}

/// POST /password/reset - set a new password with a reset token
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(body): Json<ResetPasswordRequest>,
) -> AuthResult<Json<AckResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    if body.reset_token.trim().len() < 20 {
        return Err(AuthError::InvalidResetToken);
    }

    let use_case = ResetPasswordUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(&body.email, &body.reset_token, body.new_password)
        .await?;

    Ok(Json(AckResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// GET /me - identity behind the presented session token
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        role: user.role.code().to_string(),
    })
}
