//! System handlers: service flags and bot settings

use axum::{extract::State, Json};
use calldesk_service::{
    BotSettingsRequest, BotSettingsResponse, ServiceFlagStatus, SystemService,
    ToggleServiceRequest,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::extractors::{AdminPrincipal, AuthPrincipal, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle acknowledgment
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub service_name: String,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Per-service enabled flags
///
/// GET /system/status
pub async fn status(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
) -> ApiResult<Json<BTreeMap<String, ServiceFlagStatus>>> {
    let service = SystemService::new(state.service_context());
    let response = service.status().await?;
    Ok(Json(response))
}

/// Flip one named service flag
///
/// POST /system/toggle
pub async fn toggle(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    ValidatedJson(request): ValidatedJson<ToggleServiceRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let service = SystemService::new(state.service_context());
    let flag = service.toggle(admin.id, request).await?;
    Ok(Json(ToggleResponse {
        service_name: flag.name,
        enabled: flag.enabled,
        updated_at: flag.updated_at,
    }))
}

/// Read the caller's bot settings (seeded on first touch)
///
/// GET /system/bot-settings
pub async fn bot_settings(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> ApiResult<Json<BotSettingsResponse>> {
    let service = SystemService::new(state.service_context());
    let response = service.bot_settings(principal.id).await?;
    Ok(Json(response))
}

/// Update the caller's bot settings (lifecycle-gated)
///
/// POST /system/bot-settings
pub async fn update_bot_settings(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    ValidatedJson(request): ValidatedJson<BotSettingsRequest>,
) -> ApiResult<Json<BotSettingsResponse>> {
    let service = SystemService::new(state.service_context());
    let response = service.update_bot_settings(principal.id, request).await?;
    Ok(Json(response))
}
