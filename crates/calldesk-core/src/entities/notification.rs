//! Notification entity - addressed or broadcast message

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// An in-app notification.
///
/// `principal_id = None` marks a broadcast row, visible to admin-role
/// principals (contact-form submissions land here).
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub principal_id: Option<Uuid>,
    /// Category tag such as `contact_form` or `admin_update`
    pub kind: String,
    pub title: String,
    pub body: String,
    /// Optional structured payload, e.g. contact-form fields
    pub payload: Option<Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification
    #[must_use]
    pub fn new(
        id: Uuid,
        principal_id: Option<Uuid>,
        kind: String,
        title: String,
        body: String,
    ) -> Self {
        Self {
            id,
            principal_id,
            kind,
            title,
            body,
            payload: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this notification is a broadcast to all admins
    #[inline]
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        self.principal_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_has_no_target() {
        let n = Notification::new(
            Uuid::new_v4(),
            None,
            "contact_form".to_string(),
            "New inquiry".to_string(),
            "hello".to_string(),
        );
        assert!(n.is_broadcast());
        assert!(!n.read);
    }

    #[test]
    fn test_addressed_notification() {
        let n = Notification::new(
            Uuid::new_v4(),
            Some(Uuid::new_v4()),
            "admin_update".to_string(),
            "Maintenance".to_string(),
            "tonight".to_string(),
        );
        assert!(!n.is_broadcast());
    }
}
