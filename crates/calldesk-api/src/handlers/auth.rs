//! Authentication handlers
//!
//! Login, token refresh, current-principal projection, password management,
//! and elevated-action PIN verification.

use axum::{extract::State, Json};
use calldesk_service::{
    AuthResponse, AuthService, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
    MessageResponse, PinVerificationRequest, PrincipalResponse, RefreshTokenRequest,
    ResetPasswordRequest, VerifyResetCodeRequest,
};

use crate::extractors::{AuthPrincipal, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Rotate the token pair from a refresh token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Current principal projection
///
/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> ApiResult<Json<PrincipalResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.me(principal.id).await?;
    Ok(Json(response))
}

/// Change password (requires the current secret)
///
/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.change_password(principal.id, request).await?;
    Ok(Json(response))
}

/// Request a password reset code (uniform response)
///
/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.forgot_password(request).await?;
    Ok(Json(response))
}

/// Validate a reset code
///
/// POST /auth/verify-reset-code
pub async fn verify_reset_code(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyResetCodeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_reset_code(request).await?;
    Ok(Json(response))
}

/// Consume a reset code and set a new password
///
/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.reset_password(request).await?;
    Ok(Json(response))
}

/// Verify the elevated-action PIN
///
/// POST /auth/verify-pin
pub async fn verify_pin(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    ValidatedJson(request): ValidatedJson<PinVerificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_pin(request).await?;
    Ok(Json(response))
}
