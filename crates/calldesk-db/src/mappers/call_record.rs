//! Call record model <-> entity mapper

use calldesk_core::{CallRecord, CallStats, DayActivity, DomainError};

use crate::models::{CallRecordModel, CallStatsModel, DayActivityModel};

use super::parse_column;

impl TryFrom<CallRecordModel> for CallRecord {
    type Error = DomainError;

    fn try_from(model: CallRecordModel) -> Result<Self, Self::Error> {
        Ok(CallRecord {
            id: model.id,
            principal_id: model.principal_id,
            external_ref: model.external_ref,
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            outcome: parse_column(&model.outcome, "outcome")?,
            duration_minutes: model.duration_minutes,
            transcript: model.transcript,
            cost: model.cost,
            revenue: model.revenue,
            created_at: model.created_at,
        })
    }
}

/// Convert the aggregate counters row to the domain type
pub fn stats_from_model(model: CallStatsModel) -> CallStats {
    CallStats {
        total_calls: model.total_calls,
        answered_calls: model.answered_calls,
        total_minutes: model.total_minutes,
        total_cost: model.total_cost,
        total_revenue: model.total_revenue,
    }
}

/// Convert a per-day bucket row to the domain type
pub fn day_activity_from_model(model: DayActivityModel) -> DayActivity {
    DayActivity {
        day: model.day,
        calls: model.calls,
        minutes: model.minutes,
        revenue: model.revenue,
    }
}
