//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Projections are
//! role-shaped: admin-only financial fields are `Option` and skipped when
//! absent, so a tenant response never carries them.

use calldesk_core::{CallOutcome, LifecycleStatus, Role, UserCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic acknowledgment
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgment plus affected-row count (bulk lifecycle actions)
#[derive(Debug, Serialize)]
pub struct AffectedCountResponse {
    pub message: String,
    pub count: u64,
}

/// Offset pagination metadata: `pages = ceil(total / limit)`
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens and a principal summary
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: PrincipalResponse,
}

/// Role-shaped principal projection.
///
/// `revenue_generated` is populated only for admin viewers.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub category: UserCategory,
    pub status: LifecycleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_reason: Option<String>,
    pub minutes_used: f64,
    pub minutes_allocated: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_generated: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// User Administration Responses
// ============================================================================

/// Full admin projection of a principal
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub category: UserCategory,
    pub status: LifecycleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_reason: Option<String>,
    pub minutes_used: f64,
    pub minutes_allocated: i32,
    pub monthly_plan_cost: f64,
    pub revenue_generated: f64,
    pub created_at: DateTime<Utc>,
}

/// Paginated admin user listing
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<AdminUserResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Call Log Responses
// ============================================================================

/// Call record projection.
///
/// `cost` and `revenue` are populated only for admin viewers.
#[derive(Debug, Clone, Serialize)]
pub struct CallLogResponse {
    pub id: Uuid,
    pub principal_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub outcome: CallOutcome,
    pub duration_minutes: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Paginated call-log listing
#[derive(Debug, Serialize)]
pub struct CallLogListResponse {
    pub call_logs: Vec<CallLogResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Dashboard Stats Responses
// ============================================================================

/// Per-tenant usage summary
#[derive(Debug, Serialize)]
pub struct TenantStatsResponse {
    pub calls_made: i64,
    /// round(100 * answered / total); 0 when no calls
    pub pickup_rate: i64,
    pub minutes_used: f64,
    pub minutes_allocated: i32,
    pub total_minutes: f64,
    pub total_cost: f64,
    pub avg_cost_per_minute: f64,
    pub bot_active: bool,
}

/// Per-day call activity bucket
#[derive(Debug, Serialize)]
pub struct DayActivityResponse {
    pub date: NaiveDate,
    pub calls: i64,
    pub minutes: f64,
    pub revenue: f64,
}

/// Tenant ranked by revenue or minutes
#[derive(Debug, Serialize)]
pub struct TopTenantResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub category: String,
    pub revenue: f64,
    pub minutes_used: f64,
}

/// Admin-wide usage summary
#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub total_calls: i64,
    pub total_revenue: f64,
    pub active_clients: i64,
    pub pickup_rate: i64,
    pub service_status: BTreeMap<String, bool>,
    pub recent_activity: Vec<DayActivityResponse>,
    pub top_by_revenue: Vec<TopTenantResponse>,
    pub top_by_minutes: Vec<TopTenantResponse>,
}

/// Role-shaped stats payload: admins get the global summary, tenants their own
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Admin(AdminStatsResponse),
    Tenant(TenantStatsResponse),
}

// ============================================================================
// System Responses
// ============================================================================

/// One service's flag state
#[derive(Debug, Serialize)]
pub struct ServiceFlagStatus {
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Bot profile projection
#[derive(Debug, Serialize)]
pub struct BotSettingsResponse {
    pub opening_message: String,
    pub model: String,
    pub temperature: f64,
    pub response_length: String,
    pub category: UserCategory,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Notification projection
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Unread notification counter
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// Broadcast fan-out acknowledgment
#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub message: String,
    pub users_count: usize,
}
