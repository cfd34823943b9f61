//! Lifecycle service
//!
//! Drives the active/paused/blocked state machine. Pausing is a destructive
//! admin action: it requires a non-empty reason and the elevated-action PIN
//! in the same request. `blocked` is terminal from the tenant's perspective;
//! only the admin data-correction path (user update) lifts it.

use calldesk_common::AppError;
use calldesk_core::{DomainError, LifecycleStatus};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AffectedCountResponse, MessageResponse, PauseAllRequest, PauseRequest, ToggleUserRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Lifecycle service
pub struct LifecycleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LifecycleService<'a> {
    /// Create a new LifecycleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Pause one tenant: reason + correct PIN, active -> paused
    #[instrument(skip(self, request), fields(actor = %actor))]
    pub async fn pause(
        &self,
        actor: Uuid,
        principal_id: Uuid,
        request: PauseRequest,
    ) -> ServiceResult<MessageResponse> {
        // Wrong PIN leaves state untouched
        self.ctx
            .elevated_pin()
            .verify_or_forbidden(&request.pin)
            .map_err(ServiceError::from)?;

        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        principal.check_pause(&request.reason)?;

        let applied = self
            .ctx
            .principal_repo()
            .transition_status(
                principal_id,
                LifecycleStatus::Active,
                LifecycleStatus::Paused,
                Some(request.reason.trim()),
                actor,
            )
            .await?;

        if !applied {
            // Raced with another admin action; last writer wins by design,
            // so a lost precondition is reported, not retried.
            warn!(%principal_id, "Pause raced with a concurrent status change");
            return Err(ServiceError::Domain(DomainError::InvalidTransition {
                from: principal.status,
                to: LifecycleStatus::Paused,
            }));
        }

        info!(%principal_id, reason = %request.reason, "Tenant paused");
        Ok(MessageResponse::new("User paused successfully"))
    }

    /// Resume one tenant: paused -> active, reason cleared, no PIN
    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn resume(&self, actor: Uuid, principal_id: Uuid) -> ServiceResult<MessageResponse> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        principal.check_resume()?;

        let applied = self
            .ctx
            .principal_repo()
            .transition_status(
                principal_id,
                LifecycleStatus::Paused,
                LifecycleStatus::Active,
                None,
                actor,
            )
            .await?;

        if !applied {
            return Err(ServiceError::Domain(DomainError::InvalidTransition {
                from: principal.status,
                to: LifecycleStatus::Active,
            }));
        }

        info!(%principal_id, "Tenant resumed");
        Ok(MessageResponse::new("User resumed successfully"))
    }

    /// Flip between active and paused.
    ///
    /// The pausing direction is still a pause: it needs the reason and PIN
    /// from the body. The resuming direction ignores both.
    #[instrument(skip(self, request), fields(actor = %actor))]
    pub async fn toggle(
        &self,
        actor: Uuid,
        principal_id: Uuid,
        request: ToggleUserRequest,
    ) -> ServiceResult<MessageResponse> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        match principal.status {
            LifecycleStatus::Active => {
                let reason = request
                    .reason
                    .ok_or_else(|| ServiceError::validation("Pause reason is required"))?;
                let pin = request
                    .pin
                    .ok_or_else(|| ServiceError::validation("PIN is required"))?;
                self.pause(actor, principal_id, PauseRequest { reason, pin })
                    .await
            }
            LifecycleStatus::Paused => self.resume(actor, principal_id).await,
            LifecycleStatus::Blocked => Err(ServiceError::Domain(DomainError::InvalidTransition {
                from: LifecycleStatus::Blocked,
                to: LifecycleStatus::Active,
            })),
        }
    }

    /// Pause every active tenant; returns how many rows changed
    #[instrument(skip(self, request), fields(actor = %actor))]
    pub async fn pause_all(
        &self,
        actor: Uuid,
        request: PauseAllRequest,
    ) -> ServiceResult<AffectedCountResponse> {
        self.ctx
            .elevated_pin()
            .verify_or_forbidden(&request.pin)
            .map_err(ServiceError::from)?;

        if request.reason.trim().is_empty() {
            return Err(ServiceError::Domain(DomainError::PauseReasonRequired));
        }

        let count = self
            .ctx
            .principal_repo()
            .transition_all(
                LifecycleStatus::Active,
                LifecycleStatus::Paused,
                Some(request.reason.trim()),
                actor,
            )
            .await?;

        info!(count, reason = %request.reason, "Bulk pause applied");
        Ok(AffectedCountResponse {
            message: format!("Paused {count} user(s) successfully"),
            count,
        })
    }

    /// Resume every paused tenant; returns how many rows changed
    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn resume_all(&self, actor: Uuid) -> ServiceResult<AffectedCountResponse> {
        let count = self
            .ctx
            .principal_repo()
            .transition_all(LifecycleStatus::Paused, LifecycleStatus::Active, None, actor)
            .await?;

        info!(count, "Bulk resume applied");
        Ok(AffectedCountResponse {
            message: format!("Resumed {count} user(s) successfully"),
            count,
        })
    }

    /// Resource-level lifecycle gate for feature-gated actions.
    ///
    /// Status is re-read from the store on every call: the identity claim is
    /// token-cached, but pause/block must take effect on the next request.
    #[instrument(skip(self))]
    pub async fn ensure_active(&self, principal_id: Uuid) -> ServiceResult<()> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        match principal.status {
            LifecycleStatus::Active => Ok(()),
            LifecycleStatus::Paused => Err(ServiceError::App(AppError::AccountPaused {
                reason: principal
                    .pause_reason
                    .unwrap_or_else(|| "Account paused".to_string()),
            })),
            LifecycleStatus::Blocked => Err(ServiceError::App(AppError::AccountBlocked)),
        }
    }
}
