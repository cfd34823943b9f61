//! Service flag database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the service_flags table
#[derive(Debug, Clone, FromRow)]
pub struct ServiceFlagModel {
    pub name: String,
    pub enabled: bool,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}
