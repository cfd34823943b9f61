//! Principal model <-> entity mapper

use calldesk_core::{DomainError, Principal, TopTenant};

use crate::models::{PrincipalModel, TopTenantModel};

use super::parse_column;

impl TryFrom<PrincipalModel> for Principal {
    type Error = DomainError;

    fn try_from(model: PrincipalModel) -> Result<Self, Self::Error> {
        Ok(Principal {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            role: parse_column(&model.role, "role")?,
            category: parse_column(&model.category, "category")?,
            status: parse_column(&model.status, "status")?,
            pause_reason: model.pause_reason,
            status_changed_by: model.status_changed_by,
            minutes_allocated: model.minutes_allocated,
            minutes_used: model.minutes_used,
            credits_remaining: model.credits_remaining,
            monthly_plan_cost: model.monthly_plan_cost,
            revenue_generated: model.revenue_generated,
            reset_code: model.reset_code,
            reset_code_expires_at: model.reset_code_expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert a ranking row to the domain type
pub fn top_tenant_from_model(model: TopTenantModel) -> TopTenant {
    TopTenant {
        id: model.id,
        display_name: model.display_name,
        email: model.email,
        category: model.category,
        revenue: model.revenue_generated,
        minutes_used: model.minutes_used,
    }
}
