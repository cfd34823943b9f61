//! Principal entity - an authenticated actor (tenant user or admin)

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{LifecycleStatus, Role, UserCategory};

/// Principal entity: tenant user or administrator
///
/// Usage counters (`minutes_used`, `revenue_generated`, `credits_remaining`)
/// are mutated only through the ledger's atomic updates; the in-memory copy
/// is a read snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub category: UserCategory,
    pub status: LifecycleStatus,
    /// Required exactly when `status` is `Paused`
    pub pause_reason: Option<String>,
    /// Admin who performed the last status change
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
}

impl Principal {
    /// Create a new active principal with zeroed usage counters
    #[must_use]
    pub fn new(
        id: Uuid,
        email: String,
        display_name: String,
        role: Role,
        category: UserCategory,
        minutes_allocated: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name,
            role,
            category,
            status: LifecycleStatus::Active,
            pause_reason: None,
            status_changed_by: None,
            minutes_allocated,
            minutes_used: 0.0,
            credits_remaining: 0.0,
            monthly_plan_cost: 0.0,
            revenue_generated: 0.0,
            reset_code: None,
            reset_code_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical admin check, see [`Role::is_admin`]
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Minutes still available under the current allocation (never negative)
    #[must_use]
    pub fn minutes_remaining(&self) -> f64 {
        (f64::from(self.minutes_allocated) - self.minutes_used).max(0.0)
    }

    /// Validate the pause transition without applying it.
    ///
    /// Pause requires a non-empty reason and a currently active account; the
    /// PIN check happens at the service layer before this is reached.
    pub fn check_pause(&self, reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::PauseReasonRequired);
        }
        match self.status {
            LifecycleStatus::Active => Ok(()),
            from => Err(DomainError::InvalidTransition {
                from,
                to: LifecycleStatus::Paused,
            }),
        }
    }

    /// Validate the resume transition without applying it
    pub fn check_resume(&self) -> Result<(), DomainError> {
        match self.status {
            LifecycleStatus::Paused => Ok(()),
            from => Err(DomainError::InvalidTransition {
                from,
                to: LifecycleStatus::Active,
            }),
        }
    }

    /// Whether the stored reset code matches and has not expired
    #[must_use]
    pub fn reset_code_matches(&self, code: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_code, self.reset_code_expires_at) {
            (Some(stored), Some(expiry)) => stored == code && now < expiry,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tenant() -> Principal {
        Principal::new(
            Uuid::new_v4(),
            "tenant@example.com".to_string(),
            "Test Tenant".to_string(),
            Role::Tenant,
            UserCategory::Sales,
            1000,
        )
    }

    #[test]
    fn test_new_principal_is_active() {
        let p = tenant();
        assert_eq!(p.status, LifecycleStatus::Active);
        assert!(p.pause_reason.is_none());
        assert_eq!(p.minutes_used, 0.0);
    }

    #[test]
    fn test_minutes_remaining_never_negative() {
        let mut p = tenant();
        p.minutes_used = 1200.0;
        assert_eq!(p.minutes_remaining(), 0.0);
    }

    #[test]
    fn test_check_pause_requires_reason() {
        let p = tenant();
        assert!(matches!(
            p.check_pause("   "),
            Err(DomainError::PauseReasonRequired)
        ));
        assert!(p.check_pause("maintenance").is_ok());
    }

    #[test]
    fn test_check_pause_rejects_non_active() {
        let mut p = tenant();
        p.status = LifecycleStatus::Paused;
        assert!(matches!(
            p.check_pause("maintenance"),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_check_resume_rejects_blocked() {
        let mut p = tenant();
        p.status = LifecycleStatus::Blocked;
        assert!(p.check_resume().is_err());
        p.status = LifecycleStatus::Paused;
        assert!(p.check_resume().is_ok());
    }

    #[test]
    fn test_reset_code_expiry() {
        let mut p = tenant();
        let now = Utc::now();
        p.reset_code = Some("123456".to_string());
        p.reset_code_expires_at = Some(now + Duration::minutes(15));

        assert!(p.reset_code_matches("123456", now));
        assert!(!p.reset_code_matches("654321", now));
        assert!(!p.reset_code_matches("123456", now + Duration::minutes(16)));
    }
}
