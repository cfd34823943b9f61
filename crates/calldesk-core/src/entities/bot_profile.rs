//! Bot profile entity - per-tenant calling bot configuration

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserCategory;

/// Per-tenant bot configuration, created on demand with defaults
#[derive(Debug, Clone, PartialEq)]
pub struct BotProfile {
    pub principal_id: Uuid,
    pub opening_message: String,
    pub model: String,
    pub temperature: f64,
    pub response_length: String,
    pub category: UserCategory,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl BotProfile {
    /// Default profile seeded when a tenant first touches bot settings
    #[must_use]
    pub fn defaults_for(principal_id: Uuid, category: UserCategory) -> Self {
        Self {
            principal_id,
            opening_message: "Hello! How can I help you today?".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.7,
            response_length: "medium".to_string(),
            category,
            active: true,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = BotProfile::defaults_for(Uuid::new_v4(), UserCategory::Support);
        assert_eq!(profile.category, UserCategory::Support);
        assert!(profile.active);
        assert!((profile.temperature - 0.7).abs() < f64::EPSILON);
    }
}
