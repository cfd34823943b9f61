//! Authentication service
//!
//! Handles login, token refresh, password changes, and the reset-code flow.

use calldesk_common::auth::{
    generate_reset_code, hash_password, reset_code_expiry, validate_password_strength,
    verify_password,
};
use calldesk_common::AppError;
use calldesk_core::{LifecycleStatus, Principal};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, MessageResponse,
    PinVerificationRequest, PrincipalResponse, RefreshTokenRequest, ResetPasswordRequest,
    VerifyResetCodeRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The uniform forgot-password acknowledgment. Sent whether or not the email
/// exists; anything else would let a caller enumerate accounts.
const RESET_REQUESTED_MESSAGE: &str = "If the email exists, a verification code has been sent";

/// Message for a bad or expired reset code; identical for unknown emails.
const RESET_CODE_INVALID: &str = "Invalid or expired verification code";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password.
    ///
    /// Paused principals authenticate successfully so the client can render
    /// the blocking notice; only blocked principals are refused here.
    /// Authentication success does not imply feature access.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .principal_repo()
            .get_password_hash(principal.id)
            .await?
            .ok_or_else(|| {
                warn!(principal_id = %principal.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(principal_id = %principal.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if principal.status == LifecycleStatus::Blocked {
            warn!(principal_id = %principal.id, "Login refused: account blocked");
            return Err(ServiceError::App(AppError::AccountBlocked));
        }

        info!(principal_id = %principal.id, "Login successful");

        self.issue_tokens(&principal)
    }

    /// Refresh the token pair from a valid refresh token.
    ///
    /// The principal row is re-fetched so role and status changes since the
    /// original login take effect on the new tokens.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;

        let principal_id = claims.principal_id().map_err(ServiceError::from)?;

        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if principal.status == LifecycleStatus::Blocked {
            return Err(ServiceError::App(AppError::AccountBlocked));
        }

        info!(principal_id = %principal.id, "Tokens refreshed");

        self.issue_tokens(&principal)
    }

    /// Current principal projection, freshly read from the store
    #[instrument(skip(self))]
    pub async fn me(&self, principal_id: Uuid) -> ServiceResult<PrincipalResponse> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        let include_revenue = principal.is_admin();
        Ok(PrincipalResponse::project(&principal, include_revenue))
    }

    /// Change password; requires the current secret
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        principal_id: Uuid,
        request: ChangePasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        let password_hash = self
            .ctx
            .principal_repo()
            .get_password_hash(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        let is_valid = verify_password(&request.current_password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            return Err(ServiceError::validation("Current password is incorrect"));
        }

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        self.ctx
            .principal_repo()
            .update_password(principal_id, &new_hash)
            .await?;

        info!(%principal_id, "Password changed");
        Ok(MessageResponse::new("Password changed successfully"))
    }

    /// Request a password reset code.
    ///
    /// Always acknowledges with the same message; the code is stored for an
    /// out-of-band delivery channel and never appears in a response.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        if let Some(principal) = self
            .ctx
            .principal_repo()
            .find_by_email(&request.email)
            .await?
        {
            let code = generate_reset_code();
            let expires_at = reset_code_expiry(Utc::now());
            self.ctx
                .principal_repo()
                .set_reset_code(principal.id, &code, expires_at)
                .await?;

            info!(principal_id = %principal.id, "Password reset code issued");
        }

        Ok(MessageResponse::new(RESET_REQUESTED_MESSAGE))
    }

    /// Validate a reset code without consuming it
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn verify_reset_code(
        &self,
        request: VerifyResetCodeRequest,
    ) -> ServiceResult<MessageResponse> {
        self.check_reset_code(&request.email, &request.code).await?;
        Ok(MessageResponse::new("Code verified successfully"))
    }

    /// Consume a reset code and set a new password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        let principal = self.check_reset_code(&request.email, &request.code).await?;

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        self.ctx
            .principal_repo()
            .update_password(principal.id, &new_hash)
            .await?;
        self.ctx
            .principal_repo()
            .clear_reset_code(principal.id)
            .await?;

        info!(principal_id = %principal.id, "Password reset completed");
        Ok(MessageResponse::new("Password reset successfully"))
    }

    /// Verify the elevated-action PIN
    #[instrument(skip(self, request))]
    pub async fn verify_pin(
        &self,
        request: PinVerificationRequest,
    ) -> ServiceResult<MessageResponse> {
        self.ctx
            .elevated_pin()
            .verify_or_forbidden(&request.pin)
            .map_err(ServiceError::from)?;

        Ok(MessageResponse::new("PIN verified successfully"))
    }

    /// Look up a principal by email and check its stored reset code.
    ///
    /// Unknown email, missing code, mismatch, and expiry all fail with the
    /// same message.
    async fn check_reset_code(&self, email: &str, code: &str) -> ServiceResult<Principal> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::validation(RESET_CODE_INVALID))?;

        if !principal.reset_code_matches(code, Utc::now()) {
            return Err(ServiceError::validation(RESET_CODE_INVALID));
        }

        Ok(principal)
    }

    fn issue_tokens(&self, principal: &Principal) -> ServiceResult<AuthResponse> {
        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(principal.id, &principal.email, principal.role)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let include_revenue = principal.is_admin();
        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: PrincipalResponse::project(principal, include_revenue),
        })
    }
}
