//! Service flag entity - system-wide service toggles

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Services an admin can enable or disable globally
pub const KNOWN_SERVICES: &[&str] = &["ai", "calls", "whatsapp"];

/// One named system service and its enabled state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFlag {
    pub name: String,
    pub enabled: bool,
    /// Admin who last flipped the flag
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceFlag {
    /// Whether `name` is one of the toggleable services
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        KNOWN_SERVICES.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_services() {
        assert!(ServiceFlag::is_known("ai"));
        assert!(ServiceFlag::is_known("calls"));
        assert!(ServiceFlag::is_known("whatsapp"));
        assert!(!ServiceFlag::is_known("sms"));
    }
}
