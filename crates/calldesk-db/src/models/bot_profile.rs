//! Bot profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the bot_profiles table
#[derive(Debug, Clone, FromRow)]
pub struct BotProfileModel {
    pub principal_id: Uuid,
    pub opening_message: String,
    pub model: String,
    pub temperature: f64,
    pub response_length: String,
    pub category: String,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}
