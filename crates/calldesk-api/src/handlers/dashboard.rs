//! Dashboard handlers: role-shaped stats and call-log history

use axum::{
    extract::{Path, Query, State},
    Json,
};
use calldesk_core::CallOutcome;
use calldesk_service::{
    CallLogListRequest, CallLogListResponse, CallLogResponse, CallLogService, StatsResponse,
    UsageService,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{AuthPrincipal, Pagination};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Call-log listing filters (pagination comes from its own extractor)
#[derive(Debug, Deserialize, Default)]
pub struct CallLogFilters {
    /// Outcome filter; "all" and empty are treated as no filter
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive contact-name match
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    /// Owner filter; honored for admin callers only
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Role-shaped usage summary
///
/// GET /dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> ApiResult<Json<StatsResponse>> {
    let service = UsageService::new(state.service_context());
    let response = service.stats_for(principal.id, principal.role).await?;
    Ok(Json(response))
}

/// Filtered, paginated call-log listing
///
/// GET /dashboard/call-logs
pub async fn call_logs(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    pagination: Pagination,
    Query(filters): Query<CallLogFilters>,
) -> ApiResult<Json<CallLogListResponse>> {
    let outcome = match filters.status.as_deref() {
        None | Some("" | "all") => None,
        Some(s) => Some(
            s.parse::<CallOutcome>()
                .map_err(|e| ApiError::invalid_query(e.to_string()))?,
        ),
    };

    let service = CallLogService::new(state.service_context());
    let response = service
        .list(
            principal.id,
            principal.role,
            CallLogListRequest {
                owner_id: filters.owner_id,
                outcome,
                contact: filters.contact.filter(|c| !c.is_empty()),
                date_from: filters.date_from,
                date_to: filters.date_to,
                page: pagination.page,
                page_size: pagination.limit,
            },
        )
        .await?;

    Ok(Json(response))
}

/// Single call record, ownership-checked
///
/// GET /dashboard/call-logs/:id
pub async fn call_log_detail(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Path(record_id): Path<Uuid>,
) -> ApiResult<Json<CallLogResponse>> {
    let service = CallLogService::new(state.service_context());
    let response = service.get(principal.id, principal.role, record_id).await?;
    Ok(Json(response))
}
