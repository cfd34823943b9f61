//! Authentication extractors
//!
//! Session middleware and authorization guard, expressed as Axum extractors.
//! `AuthPrincipal` validates the bearer token and exposes the identity claims
//! without a database round trip; `AdminPrincipal` layers the role check on
//! top. Lifecycle status is NOT checked here - feature-gated handlers re-read
//! it at the resource level.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use calldesk_common::AppError;
use calldesk_core::Role;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated principal claims extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        // Validate the token against the access secret
        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidAuthFormat
            })?;

        let id = claims.principal_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid principal ID in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthPrincipal {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Authorization guard: authenticated AND admin-role
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub AuthPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = AuthPrincipal::from_request_parts(parts, state).await?;

        if !principal.role.is_admin() {
            tracing::warn!(principal_id = %principal.id, "Admin route refused");
            return Err(ApiError::App(AppError::Forbidden));
        }

        Ok(AdminPrincipal(principal))
    }
}
