//! Entity -> response DTO mappers

use calldesk_core::{BotProfile, CallRecord, Notification, Principal, TopTenant};

use super::responses::{
    AdminUserResponse, BotSettingsResponse, CallLogResponse, NotificationResponse,
    PrincipalResponse, TopTenantResponse,
};

impl PrincipalResponse {
    /// Project a principal for a viewer; revenue is admin-visible only
    pub fn project(principal: &Principal, include_revenue: bool) -> Self {
        Self {
            id: principal.id,
            name: principal.display_name.clone(),
            email: principal.email.clone(),
            role: principal.role,
            category: principal.category,
            status: principal.status,
            pause_reason: principal.pause_reason.clone(),
            minutes_used: principal.minutes_used,
            minutes_allocated: principal.minutes_allocated,
            revenue_generated: include_revenue.then_some(principal.revenue_generated),
            created_at: principal.created_at,
        }
    }
}

impl From<&Principal> for AdminUserResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            name: principal.display_name.clone(),
            email: principal.email.clone(),
            role: principal.role,
            category: principal.category,
            status: principal.status,
            pause_reason: principal.pause_reason.clone(),
            minutes_used: principal.minutes_used,
            minutes_allocated: principal.minutes_allocated,
            monthly_plan_cost: principal.monthly_plan_cost,
            revenue_generated: principal.revenue_generated,
            created_at: principal.created_at,
        }
    }
}

impl CallLogResponse {
    /// Project a call record for a viewer; financials are admin-visible only
    pub fn project(record: &CallRecord, include_financials: bool) -> Self {
        Self {
            id: record.id,
            principal_id: record.principal_id,
            external_ref: record.external_ref.clone(),
            contact_name: record.contact_name.clone(),
            contact_phone: record.contact_phone.clone(),
            outcome: record.outcome,
            duration_minutes: record.duration_minutes,
            transcript: record.transcript.clone(),
            cost: if include_financials { record.cost } else { None },
            revenue: if include_financials {
                record.revenue
            } else {
                None
            },
            created_at: record.created_at,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind.clone(),
            title: notification.title.clone(),
            body: notification.body.clone(),
            payload: notification.payload.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl From<&BotProfile> for BotSettingsResponse {
    fn from(profile: &BotProfile) -> Self {
        Self {
            opening_message: profile.opening_message.clone(),
            model: profile.model.clone(),
            temperature: profile.temperature,
            response_length: profile.response_length.clone(),
            category: profile.category,
            active: profile.active,
            updated_at: profile.updated_at,
        }
    }
}

impl From<TopTenant> for TopTenantResponse {
    fn from(tenant: TopTenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.display_name,
            email: tenant.email,
            category: tenant.category,
            revenue: tenant.revenue,
            minutes_used: tenant.minutes_used,
        }
    }
}
