//! System service: global service flags and per-tenant bot profiles

use calldesk_core::{BotProfile, DomainError, ServiceFlag};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{BotSettingsRequest, BotSettingsResponse, ServiceFlagStatus, ToggleServiceRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lifecycle::LifecycleService;

/// System service
pub struct SystemService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SystemService<'a> {
    /// Create a new SystemService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Per-service enabled flags
    #[instrument(skip(self))]
    pub async fn status(&self) -> ServiceResult<BTreeMap<String, ServiceFlagStatus>> {
        let flags = self.ctx.service_flag_repo().all().await?;

        Ok(flags
            .into_iter()
            .map(|f| {
                (
                    f.name,
                    ServiceFlagStatus {
                        enabled: f.enabled,
                        updated_at: f.updated_at,
                    },
                )
            })
            .collect())
    }

    /// Flip one named service flag (admin)
    #[instrument(skip(self, request), fields(actor = %actor))]
    pub async fn toggle(
        &self,
        actor: Uuid,
        request: ToggleServiceRequest,
    ) -> ServiceResult<ServiceFlag> {
        if !ServiceFlag::is_known(&request.service_name) {
            return Err(ServiceError::Domain(DomainError::UnknownService(
                request.service_name,
            )));
        }

        let flag = self
            .ctx
            .service_flag_repo()
            .toggle(&request.service_name, actor)
            .await?;

        info!(service = %flag.name, enabled = flag.enabled, "Service flag toggled");
        Ok(flag)
    }

    /// Read the caller's bot profile, seeding defaults on first touch
    #[instrument(skip(self))]
    pub async fn bot_settings(&self, principal_id: Uuid) -> ServiceResult<BotSettingsResponse> {
        let profile = self.find_or_seed_profile(principal_id).await?;
        Ok(BotSettingsResponse::from(&profile))
    }

    /// Update the caller's bot profile.
    ///
    /// Feature-gated: paused and blocked accounts are refused even though
    /// their tokens still validate.
    #[instrument(skip(self, request))]
    pub async fn update_bot_settings(
        &self,
        principal_id: Uuid,
        request: BotSettingsRequest,
    ) -> ServiceResult<BotSettingsResponse> {
        LifecycleService::new(self.ctx)
            .ensure_active(principal_id)
            .await?;

        let mut profile = self.find_or_seed_profile(principal_id).await?;

        if let Some(opening_message) = request.opening_message {
            profile.opening_message = opening_message;
        }
        if let Some(model) = request.model {
            profile.model = model;
        }
        if let Some(temperature) = request.temperature {
            profile.temperature = temperature;
        }
        if let Some(response_length) = request.response_length {
            profile.response_length = response_length;
        }
        if let Some(category) = request.category {
            profile.category = category;
        }
        if let Some(active) = request.active {
            profile.active = active;
        }

        self.ctx.bot_profile_repo().upsert(&profile).await?;

        info!(%principal_id, "Bot settings updated");
        Ok(BotSettingsResponse::from(&profile))
    }

    async fn find_or_seed_profile(&self, principal_id: Uuid) -> ServiceResult<BotProfile> {
        if let Some(profile) = self.ctx.bot_profile_repo().find(principal_id).await? {
            return Ok(profile);
        }

        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        let profile = BotProfile::defaults_for(principal_id, principal.category);
        self.ctx.bot_profile_repo().upsert(&profile).await?;
        Ok(profile)
    }
}
