//! Principal database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the principals table.
///
/// Enumerated columns are stored as TEXT (CHECK-constrained) and parsed into
/// value objects by the mapper.
#[derive(Debug, Clone, FromRow)]
pub struct PrincipalModel {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub category: String,
    pub status: String,
    pub pause_reason: Option<String>,
    pub status_changed_by: Option<Uuid>,
    pub minutes_allocated: i32,
    pub minutes_used: f64,
    pub credits_remaining: f64,
    pub monthly_plan_cost: f64,
    pub revenue_generated: f64,
    pub reset_code: Option<String>,
    pub reset_code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PrincipalModel {
    /// Check if the principal is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Row shape for the top-tenants ranking queries
#[derive(Debug, Clone, FromRow)]
pub struct TopTenantModel {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub category: String,
    pub revenue_generated: f64,
    pub minutes_used: f64,
}
