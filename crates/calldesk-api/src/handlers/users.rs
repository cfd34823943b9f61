//! User administration handlers (admin only)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use calldesk_core::Role;
use calldesk_service::{
    AdminUserResponse, AffectedCountResponse, BroadcastRequest, BroadcastResponse,
    CreateUserRequest, LifecycleService, MessageResponse, NotificationService, PauseAllRequest,
    PauseRequest, ToggleUserRequest, UpdateUserRequest, UserAdminService, UserListRequest,
    UserListResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{AdminPrincipal, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// User-list filters (pagination comes from its own extractor)
#[derive(Debug, Deserialize, Default)]
pub struct UserFilters {
    #[serde(default)]
    pub search: Option<String>,
    /// Role filter; "all" and empty are treated as no filter
    #[serde(default)]
    pub role: Option<String>,
}

/// Paginated, searchable user listing
///
/// GET /users
pub async fn list(
    State(state): State<AppState>,
    AdminPrincipal(_admin): AdminPrincipal,
    pagination: Pagination,
    Query(filters): Query<UserFilters>,
) -> ApiResult<Json<UserListResponse>> {
    let role = match filters.role.as_deref() {
        None | Some("" | "all") => None,
        Some(s) => Some(
            s.parse::<Role>()
                .map_err(|e| ApiError::invalid_query(e.to_string()))?,
        ),
    };

    let service = UserAdminService::new(state.service_context());
    let response = service
        .list(UserListRequest {
            search: filters.search.filter(|s| !s.is_empty()),
            role,
            page: pagination.page,
            page_size: pagination.limit,
        })
        .await?;

    Ok(Json(response))
}

/// Create a tenant
///
/// POST /users
pub async fn create(
    State(state): State<AppState>,
    AdminPrincipal(_admin): AdminPrincipal,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<AdminUserResponse>>> {
    let service = UserAdminService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}

/// Partial update; also the lifecycle data-correction path
///
/// PUT /users/:id
pub async fn update(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(user_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let service = UserAdminService::new(state.service_context());
    let response = service.update(admin.id, user_id, request).await?;
    Ok(Json(response))
}

/// Soft-delete a tenant (not yourself)
///
/// DELETE /users/:id
pub async fn delete(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserAdminService::new(state.service_context());
    let response = service.delete(admin.id, user_id).await?;
    Ok(Json(response))
}

/// Flip active/paused; the pausing direction needs reason + PIN in the body
///
/// POST /users/:id/toggle
pub async fn toggle(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(user_id): Path<Uuid>,
    body: Option<Json<ToggleUserRequest>>,
) -> ApiResult<Json<MessageResponse>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let service = LifecycleService::new(state.service_context());
    let response = service.toggle(admin.id, user_id, request).await?;
    Ok(Json(response))
}

/// Pause one tenant: reason + elevated-action PIN
///
/// POST /users/:id/pause
pub async fn pause(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(user_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<PauseRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = LifecycleService::new(state.service_context());
    let response = service.pause(admin.id, user_id, request).await?;
    Ok(Json(response))
}

/// Resume one tenant
///
/// POST /users/:id/resume
pub async fn resume(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let service = LifecycleService::new(state.service_context());
    let response = service.resume(admin.id, user_id).await?;
    Ok(Json(response))
}

/// Pause every active tenant
///
/// POST /users/pause-all
pub async fn pause_all(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    ValidatedJson(request): ValidatedJson<PauseAllRequest>,
) -> ApiResult<Json<AffectedCountResponse>> {
    let service = LifecycleService::new(state.service_context());
    let response = service.pause_all(admin.id, request).await?;
    Ok(Json(response))
}

/// Resume every paused tenant
///
/// POST /users/resume-all
pub async fn resume_all(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
) -> ApiResult<Json<AffectedCountResponse>> {
    let service = LifecycleService::new(state.service_context());
    let response = service.resume_all(admin.id).await?;
    Ok(Json(response))
}

/// Send an update notification to selected tenants
///
/// POST /users/broadcast
pub async fn broadcast(
    State(state): State<AppState>,
    AdminPrincipal(_admin): AdminPrincipal,
    ValidatedJson(request): ValidatedJson<BroadcastRequest>,
) -> ApiResult<Json<BroadcastResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.broadcast(request).await?;
    Ok(Json(response))
}
