//! Call record database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the call_records table
#[derive(Debug, Clone, FromRow)]
pub struct CallRecordModel {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub external_ref: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub outcome: String,
    pub duration_minutes: f64,
    pub transcript: Option<String>,
    pub cost: Option<f64>,
    pub revenue: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Row shape for the aggregate counters query
#[derive(Debug, Clone, FromRow)]
pub struct CallStatsModel {
    pub total_calls: i64,
    pub answered_calls: i64,
    pub total_minutes: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
}

/// Row shape for the per-day activity query
#[derive(Debug, Clone, FromRow)]
pub struct DayActivityModel {
    pub day: NaiveDate,
    pub calls: i64,
    pub minutes: f64,
    pub revenue: f64,
}
