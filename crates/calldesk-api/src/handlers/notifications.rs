//! Notification handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use calldesk_service::{
    MessageResponse, NotificationResponse, NotificationService, UnreadCountResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::AuthPrincipal;
use crate::response::ApiResult;
use crate::state::AppState;

/// Listing filters
#[derive(Debug, Deserialize, Default)]
pub struct NotificationFilters {
    #[serde(default)]
    pub unread_only: bool,
}

/// Role-scoped notification listing, newest first
///
/// GET /notifications
pub async fn list(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Query(filters): Query<NotificationFilters>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .list_for(principal.id, principal.role, filters.unread_only)
        .await?;
    Ok(Json(response))
}

/// Unread counter
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.unread_count(principal.id, principal.role).await?;
    Ok(Json(response))
}

/// Mark one notification read (idempotent)
///
/// POST /notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_read(notification_id).await?;
    Ok(Json(response))
}
