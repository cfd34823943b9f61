//! Call record entity - one completed call, append-only

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::CallOutcome;

/// A single completed call attributed to a principal.
///
/// Immutable once written; cost and revenue are admin-visible only and are
/// stripped from tenant projections at the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub id: Uuid,
    pub principal_id: Uuid,
    /// Identifier from the telephony collaborator, when known
    pub external_ref: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub outcome: CallOutcome,
    pub duration_minutes: f64,
    pub transcript: Option<String>,
    pub cost: Option<f64>,
    pub revenue: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl CallRecord {
    /// Create a new call record, rejecting negative durations
    pub fn new(
        id: Uuid,
        principal_id: Uuid,
        contact_name: String,
        contact_phone: String,
        outcome: CallOutcome,
        duration_minutes: f64,
    ) -> Result<Self, DomainError> {
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(DomainError::InvalidDuration(duration_minutes));
        }
        Ok(Self {
            id,
            principal_id,
            external_ref: None,
            contact_name,
            contact_phone,
            outcome,
            duration_minutes,
            transcript: None,
            cost: None,
            revenue: None,
            created_at: Utc::now(),
        })
    }

    /// Whether this record drives usage accounting
    #[inline]
    #[must_use]
    pub fn is_billable(&self) -> bool {
        self.outcome.is_billable()
    }
}
