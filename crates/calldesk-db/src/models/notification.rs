//! Notification database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: Uuid,
    pub principal_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub payload: Option<Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
