//! Test fixtures and response mirrors
//!
//! Deserialization-side copies of the API's JSON shapes, restricted to the
//! fields the tests assert on.

use serde::Deserialize;
use uuid::Uuid;

/// Auth response mirror
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserView,
}

/// Principal projection mirror
#[derive(Debug, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[serde(default)]
    pub pause_reason: Option<String>,
    pub minutes_used: f64,
    pub minutes_allocated: i32,
    #[serde(default)]
    pub revenue_generated: Option<f64>,
}

/// Error envelope mirror
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail mirror
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Tenant stats mirror
#[derive(Debug, Deserialize)]
pub struct TenantStats {
    pub calls_made: i64,
    pub pickup_rate: i64,
    pub minutes_used: f64,
    pub minutes_allocated: i32,
    pub total_cost: f64,
}

/// Paginated call-log listing mirror
#[derive(Debug, Deserialize)]
pub struct CallLogList {
    pub call_logs: Vec<CallLogView>,
    pub pagination: PaginationView,
}

/// Call record mirror
#[derive(Debug, Deserialize)]
pub struct CallLogView {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub outcome: String,
    pub duration_minutes: f64,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
}

/// Pagination metadata mirror
#[derive(Debug, Deserialize)]
pub struct PaginationView {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Bulk lifecycle action mirror
#[derive(Debug, Deserialize)]
pub struct AffectedCount {
    pub message: String,
    pub count: u64,
}

/// Notification mirror
#[derive(Debug, Deserialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub read: bool,
}

/// Unread counter mirror
#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}
